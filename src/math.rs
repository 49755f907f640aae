#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Instantaneous tilt of the device about its forward axis, in degrees.
///
/// Maps the gravity vector projected onto the screen plane with
/// `atan2(x, -y)`: 0 with the top edge up, +-90 on the sides, continuous
/// through +-180 at the bottom. A zero projection (free fall, or a sensor
/// reporting all zeros) reads as no tilt rather than tripping the
/// `atan2(0, -0.0) == pi` corner.
pub fn tilt_angle(accel: Vector3) -> f64 {
    if accel.x == 0.0 && accel.y == 0.0 {
        return 0.0;
    }
    accel.x.atan2(-accel.y).to_degrees()
}

/// First-order exponential blend: `out = alpha * input + (1 - alpha) * state`.
///
/// State starts at zero, so the blend applies from the very first sample.
/// The filter is evaluated once per delivery with no timestamp weighting,
/// which makes its time constant depend on the actual delivery rate.
pub struct LowPassFilter {
    alpha: f64,
    state: f64,
}

impl LowPassFilter {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, state: 0.0 }
    }

    pub fn update(&mut self, input: f64) -> f64 {
        let filtered = self.alpha * input + (1.0 - self.alpha) * self.state;
        self.state = filtered;
        filtered
    }

    pub fn value(&self) -> f64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn boundary_angles() {
        assert!(close(tilt_angle(Vector3::new(0.0, -1.0, 0.0)), 0.0));
        assert!(close(tilt_angle(Vector3::new(1.0, 0.0, 0.0)), 90.0));
        assert!(close(tilt_angle(Vector3::new(-1.0, 0.0, 0.0)), -90.0));
        assert!(close(tilt_angle(Vector3::new(0.0, 1.0, 0.0)), 180.0));
    }

    #[test]
    fn zero_vector_is_no_tilt() {
        assert_eq!(tilt_angle(Vector3::new(0.0, 0.0, 0.0)), 0.0);
        // z alone carries no tilt information either
        assert_eq!(tilt_angle(Vector3::new(0.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn smoothing_recurrence() {
        let mut filter = LowPassFilter::new(0.1);
        let inputs = [90.0, 90.0, -30.0, 12.5, 0.0];
        let mut expected = 0.0;
        for input in inputs {
            expected = 0.1 * input + 0.9 * expected;
            assert!(close(filter.update(input), expected));
            assert!(close(filter.value(), expected));
        }
    }

    #[test]
    fn smoothing_concrete_scenario() {
        let mut filter = LowPassFilter::new(0.1);
        let raw = tilt_angle(Vector3::new(1.0, 0.0, 0.0));
        assert!(close(filter.update(raw), 9.0));
        assert!(close(filter.update(raw), 17.1));
    }

    #[test]
    fn alpha_one_passes_through() {
        let mut filter = LowPassFilter::new(1.0);
        assert!(close(filter.update(77.0), 77.0));
        assert!(close(filter.update(77.0), 77.0));
    }

    #[test]
    fn wraparound_blends_through_interior() {
        // Known limitation: the blend works on raw angles, so crossing the
        // +-180 seam momentarily averages toward 0 instead of staying near
        // the seam.
        let mut filter = LowPassFilter::new(0.5);
        for _ in 0..60 {
            filter.update(179.0);
        }
        assert!((filter.value() - 179.0).abs() < 1e-6);
        let blended = filter.update(-179.0);
        assert!(blended.abs() < 0.01);
    }
}
