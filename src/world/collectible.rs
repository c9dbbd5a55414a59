//! Collectibles spin and bob in place until the robot picks them up

use crate::core::types::Seconds;

#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    /// Spin rate in degrees per second
    pub spin_speed: f32,
    /// Peak vertical offset of the bob
    pub bob_height: f32,
    /// Bob frequency in radians per second
    pub bob_speed: f32,
}

impl Default for Collectible {
    fn default() -> Self {
        Self {
            spin_speed: 45.0,
            bob_height: 0.2,
            bob_speed: 2.0,
        }
    }
}

impl Collectible {
    /// Vertical offset from the resting height at world time `time`
    pub fn bob_offset(&self, time: Seconds) -> f32 {
        (time * self.bob_speed).sin() * self.bob_height
    }

    /// Yaw after spinning for `dt`, kept in [0, 360)
    pub fn spin(&self, yaw_degrees: f32, dt: Seconds) -> f32 {
        (yaw_degrees + self.spin_speed * dt).rem_euclid(360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bob_stays_within_height() {
        let gem = Collectible::default();
        for step in 0..100 {
            let offset = gem.bob_offset(step as f32 * 0.1);
            assert!(offset.abs() <= gem.bob_height + 1e-6);
        }
        assert_eq!(gem.bob_offset(0.0), 0.0);
    }

    #[test]
    fn test_spin_wraps() {
        let gem = Collectible::default();
        let yaw = gem.spin(350.0, 1.0);
        assert!((yaw - 35.0).abs() < 1e-4);
    }
}
