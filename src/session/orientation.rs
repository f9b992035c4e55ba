use std::sync::atomic::{AtomicU64, Ordering};

/// Rotation targets for the device model, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub rot_x: f32,
    pub rot_z: f32,
}

impl Orientation {
    pub fn new(rot_x: f32, rot_z: f32) -> Self {
        Self { rot_x, rot_z }
    }

    /// Target for a tilt reading: `ay` pitches around x, `ax` rolls around z.
    pub fn from_tilt(ax: f64, ay: f64, scale: f32) -> Self {
        Self {
            rot_x: ay as f32 * scale,
            rot_z: -(ax as f32) * scale,
        }
    }

    /// Moves `factor` of the way toward `target`.
    pub fn approach(self, target: Orientation, factor: f32) -> Self {
        Self {
            rot_x: self.rot_x + (target.rot_x - self.rot_x) * factor,
            rot_z: self.rot_z + (target.rot_z - self.rot_z) * factor,
        }
    }

    pub fn distance(self, other: Orientation) -> f32 {
        (self.rot_x - other.rot_x).abs().max((self.rot_z - other.rot_z).abs())
    }

    fn pack(self) -> u64 {
        ((self.rot_x.to_bits() as u64) << 32) | self.rot_z.to_bits() as u64
    }

    fn unpack(bits: u64) -> Self {
        Self {
            rot_x: f32::from_bits((bits >> 32) as u32),
            rot_z: f32::from_bits(bits as u32),
        }
    }
}

/// Latest orientation target, written by the event handler and read by the
/// device renderer. Both angles live in one word so a reader never sees a
/// half-updated pair.
#[derive(Debug, Default)]
pub struct OrientationTarget {
    bits: AtomicU64,
}

impl OrientationTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, orientation: Orientation) {
        self.bits.store(orientation.pack(), Ordering::Release);
    }

    pub fn load(&self) -> Orientation {
        Orientation::unpack(self.bits.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn starts_level() {
        assert_eq!(OrientationTarget::new().load(), Orientation::default());
    }

    #[test]
    fn stores_both_angles_together() {
        let target = OrientationTarget::new();
        target.store(Orientation::new(-1.25, 0.5));
        assert_eq!(target.load(), Orientation::new(-1.25, 0.5));

        target.store(Orientation::new(3.0, -0.0));
        let loaded = target.load();
        assert_eq!(loaded.rot_x, 3.0);
        assert!(loaded.rot_z.is_sign_negative());
    }

    #[test]
    fn full_tilt_is_a_quarter_turn() {
        let o = Orientation::from_tilt(1.0, -1.0, FRAC_PI_2);
        assert!((o.rot_x + FRAC_PI_2).abs() < 1e-6);
        assert!((o.rot_z + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn approach_closes_a_fraction_of_the_gap() {
        let current = Orientation::new(0.0, 1.0);
        let next = current.approach(Orientation::new(1.0, 0.0), 0.1);
        assert!((next.rot_x - 0.1).abs() < 1e-6);
        assert!((next.rot_z - 0.9).abs() < 1e-6);
        assert!((next.distance(Orientation::new(1.0, 0.0)) - 0.9).abs() < 1e-6);
    }
}
