//! World objects storage and queries

use crate::core::types::{ObjectId, Seconds, COLLECTIBLE_TAG, OBSTACLE_TAG};
use crate::world::collectible::Collectible;
use crate::world::collision::Collider;
use crate::world::obstacle::Obstacle;
use ahash::AHashMap;
use glam::Vec3;

/// Behaviour attached to a world object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectBody {
    Obstacle(Obstacle),
    Collectible(Collectible),
    /// Solid scenery with no behaviour of its own
    Prop,
}

/// Anything placed in the level besides the robot
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    /// Assigned by `WorldObjects::spawn`
    pub id: ObjectId,
    pub name: String,
    /// Compared by string when the robot touches the object
    pub tag: String,
    pub position: Vec3,
    /// Height the object rests at; collectibles bob around it
    pub rest_height: f32,
    pub yaw_degrees: f32,
    pub collider: Collider,
    /// Trigger colliders report overlaps without blocking
    pub trigger: bool,
    pub body: ObjectBody,
}

impl WorldObject {
    pub fn obstacle(name: &str, position: Vec3, half_extents: Vec3, obstacle: Obstacle) -> Self {
        Self {
            id: ObjectId(0),
            name: name.to_string(),
            tag: OBSTACLE_TAG.to_string(),
            position,
            rest_height: position.y,
            yaw_degrees: 0.0,
            collider: Collider::Box { half_extents },
            trigger: false,
            body: ObjectBody::Obstacle(obstacle),
        }
    }

    pub fn collectible(name: &str, position: Vec3, radius: f32, collectible: Collectible) -> Self {
        Self {
            id: ObjectId(0),
            name: name.to_string(),
            tag: COLLECTIBLE_TAG.to_string(),
            position,
            rest_height: position.y,
            yaw_degrees: 0.0,
            collider: Collider::Sphere { radius },
            trigger: true,
            body: ObjectBody::Collectible(collectible),
        }
    }

    pub fn prop(name: &str, tag: &str, position: Vec3, half_extents: Vec3) -> Self {
        Self {
            id: ObjectId(0),
            name: name.to_string(),
            tag: tag.to_string(),
            position,
            rest_height: position.y,
            yaw_degrees: 0.0,
            collider: Collider::Box { half_extents },
            trigger: false,
            body: ObjectBody::Prop,
        }
    }

    /// Advance idle animations and timers
    fn update(&mut self, time: Seconds, dt: Seconds) {
        match &mut self.body {
            ObjectBody::Obstacle(obstacle) => obstacle.update(dt),
            ObjectBody::Collectible(collectible) => {
                self.yaw_degrees = collectible.spin(self.yaw_degrees, dt);
                self.position.y = self.rest_height + collectible.bob_offset(time);
            }
            ObjectBody::Prop => {}
        }
    }
}

/// Storage for all objects in the level (obstacles, collectibles, props)
#[derive(Debug, Clone)]
pub struct WorldObjects {
    instances: AHashMap<ObjectId, WorldObject>,
    next_id: u32,
    time: Seconds,
}

impl WorldObjects {
    pub fn new() -> Self {
        Self {
            instances: AHashMap::new(),
            next_id: 1,
            time: 0.0,
        }
    }

    /// Add an object, assigning it a fresh id
    pub fn spawn(&mut self, mut object: WorldObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        object.id = id;
        self.instances.insert(id, object);
        id
    }

    /// Get an object by ID
    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.instances.get(&id)
    }

    /// Get mutable reference to an object
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.instances.get_mut(&id)
    }

    /// Obstacle behaviour of an object, if it has one
    pub fn obstacle_mut(&mut self, id: ObjectId) -> Option<&mut Obstacle> {
        match self.instances.get_mut(&id).map(|object| &mut object.body) {
            Some(ObjectBody::Obstacle(obstacle)) => Some(obstacle),
            _ => None,
        }
    }

    /// Remove an object
    pub fn remove(&mut self, id: ObjectId) -> Option<WorldObject> {
        self.instances.remove(&id)
    }

    /// Get all objects whose origin lies within radius of a point
    pub fn get_in_radius(&self, center: Vec3, radius: f32) -> Vec<&WorldObject> {
        let radius_sq = radius * radius;
        self.iter_sorted()
            .filter(|obj| obj.position.distance_squared(center) <= radius_sq)
            .collect()
    }

    /// Iterate over all objects
    pub fn iter(&self) -> impl Iterator<Item = &WorldObject> {
        self.instances.values()
    }

    /// Iterate over all objects in id order
    pub fn iter_sorted(&self) -> impl Iterator<Item = &WorldObject> {
        let mut objects: Vec<&WorldObject> = self.instances.values().collect();
        objects.sort_by_key(|object| object.id);
        objects.into_iter()
    }

    /// Number of objects carrying `tag`
    pub fn count_tagged(&self, tag: &str) -> usize {
        self.instances
            .values()
            .filter(|object| object.tag == tag)
            .count()
    }

    pub fn collectibles_remaining(&self) -> usize {
        self.count_tagged(COLLECTIBLE_TAG)
    }

    /// Seconds of world time simulated so far
    pub fn time(&self) -> Seconds {
        self.time
    }

    /// Advance animations of every object
    pub fn update(&mut self, dt: Seconds) {
        self.time += dt;
        let time = self.time;
        for object in self.instances.values_mut() {
            object.update(time, dt);
        }
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for WorldObjects {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::obstacle::ObstacleKind;

    fn rock(pos: Vec3) -> WorldObject {
        WorldObject::obstacle("rock", pos, Vec3::splat(0.5), Obstacle::new(ObstacleKind::Rock))
    }

    #[test]
    fn test_spawn_assigns_sequential_ids() {
        let mut objects = WorldObjects::new();
        let a = objects.spawn(rock(Vec3::ZERO));
        let b = objects.spawn(rock(Vec3::X));
        assert_eq!(a, ObjectId(1));
        assert_eq!(b, ObjectId(2));
        assert_eq!(objects.get(b).unwrap().id, b);
    }

    #[test]
    fn test_get_in_radius() {
        let mut objects = WorldObjects::new();
        objects.spawn(rock(Vec3::new(10.0, 0.0, 10.0)));
        objects.spawn(rock(Vec3::new(50.0, 0.0, 50.0)));

        let nearby = objects.get_in_radius(Vec3::new(12.0, 0.0, 12.0), 5.0);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].name, "rock");
    }

    #[test]
    fn test_remove_object() {
        let mut objects = WorldObjects::new();
        let id = objects.spawn(rock(Vec3::ZERO));
        assert!(objects.obstacle_mut(id).is_some());
        objects.remove(id);
        assert!(objects.get(id).is_none());
        assert!(objects.is_empty());
    }

    #[test]
    fn test_obstacle_mut_only_for_obstacles() {
        let mut objects = WorldObjects::new();
        let gem = objects.spawn(WorldObject::collectible(
            "gem",
            Vec3::ZERO,
            0.3,
            Collectible::default(),
        ));
        let crate_id = objects.spawn(WorldObject::prop("crate", "Untagged", Vec3::X, Vec3::ONE));
        assert!(objects.obstacle_mut(gem).is_none());
        assert!(objects.obstacle_mut(crate_id).is_none());
        assert_eq!(objects.collectibles_remaining(), 1);
        assert_eq!(objects.count_tagged(OBSTACLE_TAG), 0);
    }

    #[test]
    fn test_update_animates_collectibles() {
        let mut objects = WorldObjects::new();
        let gem = objects.spawn(WorldObject::collectible(
            "gem",
            Vec3::new(0.0, 1.0, 0.0),
            0.3,
            Collectible::default(),
        ));
        objects.update(0.5);

        let object = objects.get(gem).unwrap();
        assert!((object.yaw_degrees - 22.5).abs() < 1e-4);
        assert!((object.position.y - (1.0 + 1.0f32.sin() * 0.2)).abs() < 1e-5);
        assert_eq!(object.rest_height, 1.0);
    }
}
