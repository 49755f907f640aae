use std::pin::pin;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use async_executor::LocalExecutor;
use rand::Rng;

use crate::error::TiltError;
use crate::math::Vector3;
use crate::motion::{AccelSource, SampleHandlerPtr};

/// Shape of the simulated motion.
#[derive(Debug, Clone)]
pub struct SyntheticAccelConfig {
    /// Time for one full side-to-side rock.
    pub period: Duration,
    /// Peak tilt reached at the extremes, in degrees.
    pub amplitude: f64,
    /// Uniform jitter added to every axis, in g.
    pub noise: f64,
}

impl Default for SyntheticAccelConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(4),
            amplitude: 35.0,
            noise: 0.02,
        }
    }
}

/// An [`AccelSource`] that pretends to be a phone rocking side to side:
/// the gravity vector sweeps a sine of the configured amplitude, with a
/// little noise on top. Used by the demo binary and for soak testing,
/// since a desktop host has no accelerometer of its own.
pub struct SyntheticAccel {
    config: SyntheticAccelConfig,
    tx_end: Option<Sender<bool>>,
}

impl SyntheticAccel {
    pub fn new(config: SyntheticAccelConfig) -> Self {
        Self { config, tx_end: None }
    }
}

impl AccelSource for SyntheticAccel {
    fn is_available(&self) -> bool {
        true
    }

    fn subscribe(
        &mut self,
        interval: Duration,
        handler: SampleHandlerPtr,
    ) -> Result<(), TiltError> {
        if self.tx_end.is_some() {
            return Err(TiltError::SourceBusy);
        }

        let (tx_end, rx_end) = mpsc::channel::<bool>();
        let config = self.config.clone();

        thread::Builder::new()
            .name("synthetic-accel".into())
            .spawn(move || {
                let executor = LocalExecutor::new();

                async fn produce(
                    _executor: &LocalExecutor<'_>,
                    rx_end: Receiver<bool>,
                    interval: Duration,
                    config: SyntheticAccelConfig,
                    mut handler: SampleHandlerPtr,
                ) {
                    let started = Instant::now();
                    let period = config.period.as_secs_f64().max(1e-3);
                    let mut rng = rand::thread_rng();

                    loop {
                        if let Ok(end) = rx_end.try_recv() {
                            if end {
                                break;
                            }
                        }

                        let t = started.elapsed().as_secs_f64();
                        let tilt = (std::f64::consts::TAU * t / period).sin()
                            * config.amplitude.to_radians();
                        let sample = Vector3::new(
                            tilt.sin() + rng.gen_range(-config.noise..=config.noise),
                            -tilt.cos() + rng.gen_range(-config.noise..=config.noise),
                            rng.gen_range(-config.noise..=config.noise),
                        );
                        handler(Ok(sample));

                        thread::sleep(interval);
                    }
                }

                let fut = &mut pin!(produce(&executor, rx_end, interval, config, handler));
                async_io::block_on(executor.run(fut));

                log::info!("SyntheticAccel: thread ended");
            })
            .map_err(|e| TiltError::Worker(e.to_string()))?;

        self.tx_end = Some(tx_end);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if let Some(tx_end) = self.tx_end.take() {
            if let Err(e) = tx_end.send(true) {
                log::error!("SyntheticAccel: error sending end signal: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn delivers_samples_until_unsubscribed() {
        let mut source = SyntheticAccel::new(SyntheticAccelConfig::default());
        let (tx, rx) = mpsc::channel();

        source
            .subscribe(
                Duration::from_millis(1),
                Box::new(move |delivery| {
                    let _ = tx.send(delivery);
                }),
            )
            .unwrap();

        for _ in 0..5 {
            let sample = rx.recv_timeout(Duration::from_secs(2)).unwrap().unwrap();
            // Mostly gravity: the vector should stay in a consumer range.
            assert!(sample.x.abs() <= 2.0 && sample.y.abs() <= 2.0);
        }

        source.unsubscribe();
        // Idempotent.
        source.unsubscribe();
    }

    #[test]
    fn refuses_a_second_subscriber() {
        let mut source = SyntheticAccel::new(SyntheticAccelConfig::default());
        source
            .subscribe(Duration::from_millis(5), Box::new(|_| {}))
            .unwrap();
        let refused = source.subscribe(Duration::from_millis(5), Box::new(|_| {}));
        assert_eq!(refused, Err(TiltError::SourceBusy));
        source.unsubscribe();
    }
}
