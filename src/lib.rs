//! Tilt pipeline for a driving-sim dashboard remote.
//!
//! Consumes raw accelerometer samples, computes the device's tilt angle,
//! low-pass filters it, and publishes the result to observers so a
//! presentation layer can rotate a speedometer gauge with the device.
//! Everything visual (gauges, pedals, menus) lives outside this crate.

pub mod error;
pub mod math;
pub mod motion;
pub mod observed;
pub mod orientation;

pub use error::TiltError;
pub use math::{tilt_angle, LowPassFilter, Vector3};
pub use motion::{AccelSample, AccelSource, SampleHandlerPtr, SensorState};
pub use observed::{ObservedReader, ObservedVar};
pub use orientation::{OrientationConfig, OrientationFilter};
