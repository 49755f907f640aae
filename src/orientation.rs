use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::TiltError;
use crate::math::{tilt_angle, LowPassFilter};
use crate::motion::{AccelSource, SensorState};
use crate::observed::{ObservedReader, ObservedVar};

/// Knobs for the tilt pipeline.
#[derive(Debug, Clone)]
pub struct OrientationConfig {
    /// Requested time between accelerometer reads. The effective rate is
    /// whatever the source grants, and the smoothing below is evaluated
    /// once per delivery, so a slower source also means a slower filter.
    pub sample_interval: Duration,
    /// Weight in (0, 1] given to the newest raw angle. Smaller means more
    /// smoothing and more lag.
    pub smoothing_factor: f64,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(1),
            smoothing_factor: 0.1,
        }
    }
}

impl OrientationConfig {
    fn validate(&self) -> Result<(), TiltError> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(TiltError::Config(format!(
                "smoothing factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}

/// Turns a stream of raw acceleration samples into a smoothed tilt angle
/// for a rotating gauge.
///
/// The filter owns its smoothing state; observers get read-only handles to
/// the published angle and the lifecycle state. Handler callbacks run on
/// the observed vars' dispatch threads, never on the sensor's delivery
/// thread.
pub struct OrientationFilter {
    config: OrientationConfig,
    source: Box<dyn AccelSource>,
    smoother: Arc<Mutex<LowPassFilter>>,
    angle: Arc<Mutex<ObservedVar<f64>>>,
    state: Arc<Mutex<ObservedVar<SensorState>>>,
}

impl OrientationFilter {
    pub fn new(
        config: OrientationConfig,
        source: Box<dyn AccelSource>,
    ) -> Result<Self, TiltError> {
        config.validate()?;
        let smoother = Arc::new(Mutex::new(LowPassFilter::new(config.smoothing_factor)));
        Ok(Self {
            config,
            source,
            smoother,
            angle: ObservedVar::new(0.0),
            state: ObservedVar::new(SensorState::Idle),
        })
    }

    /// Read-only handle to the smoothed angle, degrees in (-180, 180].
    /// Stays at its last value across `stop`, so a gauge keeps showing
    /// the last known tilt during teardown.
    pub fn angle(&self) -> ObservedReader<f64> {
        ObservedVar::reader(&self.angle)
    }

    /// Read-only handle to the lifecycle state. Consumers that never see
    /// it leave `Idle` should fall back to a neutral, zero-tilt display.
    pub fn state(&self) -> ObservedReader<SensorState> {
        ObservedVar::reader(&self.state)
    }

    /// Begin the subscription. With no accelerometer on the platform the
    /// filter publishes `Unavailable` exactly once, stays idle, and
    /// returns [`TiltError::SensorUnavailable`].
    pub fn start(&mut self) -> Result<(), TiltError> {
        if !self.source.is_available() {
            let mut state = self.state.lock().unwrap();
            if state.get() != SensorState::Unavailable {
                state.set(SensorState::Unavailable)?;
            }
            return Err(TiltError::SensorUnavailable);
        }

        let smoother = self.smoother.clone();
        let angle = self.angle.clone();
        self.source.subscribe(
            self.config.sample_interval,
            Box::new(move |delivery| {
                let sample = match delivery {
                    Ok(sample) => sample,
                    Err(error) => {
                        // Dropped tick: the last published angle stands.
                        log::debug!("OrientationFilter: dropping sample: {}", error);
                        return;
                    }
                };

                let raw = tilt_angle(sample);
                let smoothed = smoother.lock().unwrap().update(raw);
                if let Err(error) = angle.lock().unwrap().set(smoothed) {
                    log::error!("OrientationFilter: error publishing angle: {}", error);
                }
            }),
        )?;

        self.state.lock().unwrap().set(SensorState::Running)?;
        log::debug!(
            "OrientationFilter: running, interval {:?}, smoothing {}",
            self.config.sample_interval,
            self.config.smoothing_factor
        );
        Ok(())
    }

    /// End the subscription. The last published angle stays readable;
    /// calling this again (or before `start`) is a no-op.
    pub fn stop(&mut self) {
        if self.state.lock().unwrap().get() != SensorState::Running {
            return;
        }
        self.source.unsubscribe();
        if let Err(error) = self.state.lock().unwrap().set(SensorState::Stopped) {
            log::error!("OrientationFilter: error publishing state: {}", error);
        }
    }
}
