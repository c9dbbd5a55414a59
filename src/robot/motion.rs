//! Time-based interpolation of the robot pose

use crate::core::types::{Pose, Seconds};
use glam::{Quat, Vec3};

/// One in-flight interpolation
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Translate {
        start: Vec3,
        target: Vec3,
        elapsed: Seconds,
        duration: Seconds,
    },
    Turn {
        start: Quat,
        target: Quat,
        elapsed: Seconds,
        duration: Seconds,
    },
}

impl Motion {
    /// Straight-line move of `distance` along the pose's forward axis
    pub fn translate(pose: &Pose, distance: f32, speed: f32) -> Self {
        let target = pose.position + pose.forward() * distance;
        Motion::Translate {
            start: pose.position,
            target,
            elapsed: 0.0,
            duration: distance.abs() / speed,
        }
    }

    /// Yaw turn of `degrees` about the vertical axis, composed in local space
    pub fn turn(pose: &Pose, degrees: f32, speed: f32) -> Self {
        let target = pose.orientation * Quat::from_rotation_y(degrees.to_radians());
        Motion::Turn {
            start: pose.orientation,
            target,
            elapsed: 0.0,
            duration: degrees.abs() / speed,
        }
    }

    pub fn duration(&self) -> Seconds {
        match self {
            Motion::Translate { duration, .. } | Motion::Turn { duration, .. } => *duration,
        }
    }

    pub fn elapsed(&self) -> Seconds {
        match self {
            Motion::Translate { elapsed, .. } | Motion::Turn { elapsed, .. } => *elapsed,
        }
    }

    /// Advance by `dt` and write the interpolated pose
    ///
    /// Returns the unused part of `dt` once the motion has reached its target,
    /// in which case the pose is snapped exactly onto the target.
    pub fn advance(&mut self, pose: &mut Pose, dt: Seconds) -> Option<Seconds> {
        match self {
            Motion::Translate {
                start,
                target,
                elapsed,
                duration,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    pose.position = *target;
                    Some(*elapsed - *duration)
                } else {
                    pose.position = start.lerp(*target, *elapsed / *duration);
                    None
                }
            }
            Motion::Turn {
                start,
                target,
                elapsed,
                duration,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    pose.orientation = *target;
                    Some(*elapsed - *duration)
                } else {
                    // slerp takes the shorter arc
                    pose.orientation = start.slerp(*target, *elapsed / *duration).normalize();
                    None
                }
            }
        }
    }
}
