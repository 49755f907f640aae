pub mod synthetic;

use std::time::Duration;

use crate::error::TiltError;
use crate::math::Vector3;

/// One raw accelerometer reading, each axis in units of g. Ephemeral;
/// produced by the source and consumed on delivery.
pub type AccelSample = Vector3;

/// Per-delivery callback. A delivery is either a sample or the error the
/// source reported for that tick.
pub type SampleHandlerPtr = Box<dyn FnMut(Result<AccelSample, TiltError>) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorState {
    Idle,
    Running,
    Stopped,
    Unavailable,
}

/// Platform accelerometer abstraction.
///
/// The interval passed to `subscribe` is a request, not a guarantee; the
/// source delivers at whatever rate it can grant, serialized and in order,
/// until `unsubscribe`. The underlying hardware is a process-wide resource,
/// so a source accepts one subscriber at a time and refuses the rest with
/// [`TiltError::SourceBusy`].
pub trait AccelSource: Send {
    /// Whether the platform reports accelerometer capability at all.
    fn is_available(&self) -> bool;

    fn subscribe(&mut self, interval: Duration, handler: SampleHandlerPtr)
        -> Result<(), TiltError>;

    /// Stop deliveries. Idempotent.
    fn unsubscribe(&mut self);
}
