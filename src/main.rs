use std::thread;
use std::time::Duration;

use wheeltilt::motion::synthetic::{SyntheticAccel, SyntheticAccelConfig};
use wheeltilt::{OrientationConfig, OrientationFilter, SensorState};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let source = SyntheticAccel::new(SyntheticAccelConfig::default());

    let config = OrientationConfig {
        // 1 ms is what the real app asks its phone for; the synthetic
        // source has no trouble granting something this coarse.
        sample_interval: Duration::from_millis(10),
        ..Default::default()
    };

    let mut filter = match OrientationFilter::new(config, Box::new(source)) {
        Ok(filter) => filter,
        Err(error) => {
            log::error!("Error setting up filter: {}", error);
            return;
        }
    };

    filter.state().subscribe(Box::new(|state| {
        if *state == SensorState::Unavailable {
            log::warn!("No accelerometer; the gauge stays at neutral");
        }
    }));

    let angle = filter.angle();
    angle.subscribe(Box::new(|angle| {
        log::debug!("Angle: {:+.2}", angle);
    }));

    if let Err(error) = filter.start() {
        log::error!("Error starting filter: {}", error);
        return;
    }

    // Let the simulated device rock for a while, reading the gauge the
    // way a dashboard view would.
    for _ in 0..20 {
        thread::sleep(Duration::from_millis(500));
        log::info!("Gauge: {:+.1} deg", angle.get());
    }

    filter.stop();
    log::info!("Stopped; gauge holds {:+.1} deg", angle.get());
}
