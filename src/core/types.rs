//! Core type definitions used throughout the codebase

use derive_more::Display;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Tag carried by world objects that halt the robot
pub const OBSTACLE_TAG: &str = "Obstacle";

/// Tag carried by world objects the robot picks up
pub const COLLECTIBLE_TAG: &str = "Collectible";

/// Game time in seconds
pub type Seconds = f32;

/// Identifier for objects placed in the world
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "#{}", _0)]
pub struct ObjectId(pub u32);

/// Position and orientation of the robot
///
/// Forward is +Z in local space; yaw turns about +Y, positive toward +X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` facing `heading_degrees` clockwise from +Z
    pub fn with_heading(position: Vec3, heading_degrees: f32) -> Self {
        Self {
            position,
            orientation: Quat::from_rotation_y(heading_degrees.to_radians()),
        }
    }

    /// Unit vector the robot is facing
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::Z).normalize_or_zero()
    }

    /// Heading in degrees, normalized to [0, 360)
    pub fn heading_degrees(&self) -> f32 {
        let forward = self.forward();
        let degrees = forward.x.atan2(forward.z).to_degrees();
        let normalized = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if normalized >= 360.0 {
            0.0
        } else {
            normalized
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}
