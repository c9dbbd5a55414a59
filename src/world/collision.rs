//! Overlap tests and enter-only contact signals
//!
//! The robot is a sphere. Each tick the tracker compares what the sphere
//! overlaps against what it overlapped last tick and reports only new
//! contacts, tagged with the object's tag string.

use crate::core::types::ObjectId;
use crate::world::objects::WorldObjects;
use ahash::AHashSet;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Axis-aligned box centered on the object
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Collider {
    /// Whether this collider, placed at `origin`, overlaps a sphere
    ///
    /// Touching surfaces do not count as overlap.
    pub fn overlaps_sphere(&self, origin: Vec3, center: Vec3, radius: f32) -> bool {
        match *self {
            Collider::Box { half_extents } => {
                let min = origin - half_extents;
                let max = origin + half_extents;
                let closest = center.clamp(min, max);
                closest.distance_squared(center) < radius * radius
            }
            Collider::Sphere {
                radius: own_radius,
            } => {
                let reach = own_radius + radius;
                origin.distance_squared(center) < reach * reach
            }
        }
    }
}

/// Signal produced when the robot starts touching an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum WorldSignal {
    CollisionEnter { id: ObjectId, tag: String },
    TriggerEnter { id: ObjectId, tag: String },
}

impl WorldSignal {
    pub fn id(&self) -> ObjectId {
        match self {
            WorldSignal::CollisionEnter { id, .. } | WorldSignal::TriggerEnter { id, .. } => *id,
        }
    }
}

/// Remembers current contacts so each one is signalled once per entry
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: AHashSet<ObjectId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self {
            touching: AHashSet::new(),
        }
    }

    /// Recompute contacts for a sphere and return the ones that just began
    ///
    /// Signals are ordered by object id.
    pub fn update(&mut self, objects: &WorldObjects, center: Vec3, radius: f32) -> Vec<WorldSignal> {
        let mut now_touching = AHashSet::new();
        let mut signals = Vec::new();

        for object in objects.iter_sorted() {
            if !object.collider.overlaps_sphere(object.position, center, radius) {
                continue;
            }
            now_touching.insert(object.id);
            if self.touching.contains(&object.id) {
                continue;
            }

            let tag = object.tag.clone();
            signals.push(if object.trigger {
                WorldSignal::TriggerEnter { id: object.id, tag }
            } else {
                WorldSignal::CollisionEnter { id: object.id, tag }
            });
        }

        self.touching = now_touching;
        signals
    }

    /// Forget a contact, e.g. after its object was removed
    pub fn forget(&mut self, id: ObjectId) {
        self.touching.remove(&id);
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }

    pub fn is_touching(&self, id: ObjectId) -> bool {
        self.touching.contains(&id)
    }

    /// Objects overlapped as of the last update, in id order
    pub fn touching(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.touching.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{COLLECTIBLE_TAG, OBSTACLE_TAG};
    use crate::world::collectible::Collectible;
    use crate::world::objects::WorldObject;
    use crate::world::obstacle::{Obstacle, ObstacleKind};

    #[test]
    fn test_box_sphere_overlap() {
        let collider = Collider::Box {
            half_extents: Vec3::splat(0.5),
        };
        let origin = Vec3::new(0.0, 0.0, 4.0);
        assert!(!collider.overlaps_sphere(origin, Vec3::new(0.0, 0.0, 2.9), 0.5));
        assert!(!collider.overlaps_sphere(origin, Vec3::new(0.0, 0.0, 3.0), 0.5));
        assert!(collider.overlaps_sphere(origin, Vec3::new(0.0, 0.0, 3.05), 0.5));
        assert!(collider.overlaps_sphere(origin, origin, 0.5));
    }

    #[test]
    fn test_sphere_sphere_overlap() {
        let collider = Collider::Sphere { radius: 0.5 };
        assert!(collider.overlaps_sphere(Vec3::ZERO, Vec3::new(0.9, 0.0, 0.0), 0.5));
        assert!(!collider.overlaps_sphere(Vec3::ZERO, Vec3::new(1.1, 0.0, 0.0), 0.5));
    }

    #[test]
    fn test_contacts_fire_once_per_entry() {
        let mut objects = WorldObjects::new();
        let rock = objects.spawn(WorldObject::obstacle(
            "rock",
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::splat(0.5),
            Obstacle::new(ObstacleKind::Rock),
        ));
        let mut tracker = ContactTracker::new();

        let far = Vec3::ZERO;
        let near = Vec3::new(0.0, 0.0, 1.2);
        assert!(tracker.update(&objects, far, 0.5).is_empty());

        let signals = tracker.update(&objects, near, 0.5);
        assert_eq!(
            signals,
            vec![WorldSignal::CollisionEnter {
                id: rock,
                tag: OBSTACLE_TAG.to_string()
            }]
        );
        assert!(tracker.update(&objects, near, 0.5).is_empty());

        assert!(tracker.update(&objects, far, 0.5).is_empty());
        assert_eq!(tracker.update(&objects, near, 0.5).len(), 1);
    }

    #[test]
    fn test_touching_persists_without_new_signals() {
        let mut objects = WorldObjects::new();
        let far_rock = objects.spawn(WorldObject::obstacle(
            "far",
            Vec3::new(0.6, 0.0, 1.2),
            Vec3::splat(0.5),
            Obstacle::new(ObstacleKind::Rock),
        ));
        let near_rock = objects.spawn(WorldObject::obstacle(
            "near",
            Vec3::new(-0.6, 0.0, 1.2),
            Vec3::splat(0.5),
            Obstacle::new(ObstacleKind::Rock),
        ));
        let mut tracker = ContactTracker::new();
        let center = Vec3::new(0.0, 0.0, 0.8);

        assert_eq!(tracker.update(&objects, center, 0.5).len(), 2);
        assert!(tracker.update(&objects, center, 0.5).is_empty());
        assert_eq!(tracker.touching(), vec![far_rock, near_rock]);

        tracker.forget(far_rock);
        assert_eq!(tracker.touching(), vec![near_rock]);
    }

    #[test]
    fn test_collectibles_raise_trigger_signals() {
        let mut objects = WorldObjects::new();
        let gem = objects.spawn(WorldObject::collectible(
            "gem",
            Vec3::new(0.0, 0.0, 1.0),
            0.4,
            Collectible::default(),
        ));
        let mut tracker = ContactTracker::new();

        let signals = tracker.update(&objects, Vec3::new(0.0, 0.0, 0.5), 0.5);
        assert_eq!(
            signals,
            vec![WorldSignal::TriggerEnter {
                id: gem,
                tag: COLLECTIBLE_TAG.to_string()
            }]
        );
        assert!(tracker.is_touching(gem));
    }
}
