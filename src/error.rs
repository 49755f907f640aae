use thiserror::Error;

/// Everything that can go wrong between the accelerometer and the gauge.
///
/// `Sample` errors are recovered locally (the delivery is dropped and the
/// last published angle stands); the rest surface to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiltError {
    #[error("no accelerometer available")]
    SensorUnavailable,
    #[error("accelerometer already has a subscriber")]
    SourceBusy,
    #[error("sample delivery failed: {0}")]
    Sample(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("observer dispatch channel closed")]
    Publish,
    #[error("could not spawn worker thread: {0}")]
    Worker(String),
}
