//! Load levels from TOML files
//!
//! A level places the robot and lists the obstacles, collectibles and props
//! around it:
//!
//! ```toml
//! name = "First Steps"
//!
//! [robot]
//! position = [0.0, 0.0, 0.0]
//! heading = 0.0
//!
//! [[obstacles]]
//! kind = "rock"
//! position = [0.0, 0.0, 6.0]
//! half_extents = [0.5, 0.5, 0.5]
//!
//! [[collectibles]]
//! position = [3.0, 0.0, 3.0]
//! ```

use crate::core::error::{Result, RobotError};
use crate::core::types::Pose;
use crate::world::collectible::Collectible;
use crate::world::objects::{WorldObject, WorldObjects};
use crate::world::obstacle::{Obstacle, ObstacleKind, DEFAULT_HITS_TO_DESTROY};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default level shipped with the game
pub const DEFAULT_LEVEL_PATH: &str = "data/levels/level_01.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RobotSpawn {
    pub position: Vec3,
    /// Degrees clockwise from +Z
    pub heading: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObstaclePlacement {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: ObstacleKind,
    pub position: Vec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
    #[serde(default)]
    pub destructible: bool,
    #[serde(default = "default_hits_to_destroy")]
    pub hits_to_destroy: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectiblePlacement {
    #[serde(default)]
    pub name: Option<String>,
    pub position: Vec3,
    #[serde(default = "default_collectible_radius")]
    pub radius: f32,
}

/// Solid scenery with a free-form tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropPlacement {
    pub name: String,
    #[serde(default = "default_prop_tag")]
    pub tag: String,
    pub position: Vec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelDefinition {
    pub name: String,
    pub robot: RobotSpawn,
    pub obstacles: Vec<ObstaclePlacement>,
    pub collectibles: Vec<CollectiblePlacement>,
    pub props: Vec<PropPlacement>,
}

fn default_half_extents() -> Vec3 {
    Vec3::splat(0.5)
}

fn default_hits_to_destroy() -> u32 {
    DEFAULT_HITS_TO_DESTROY
}

fn default_collectible_radius() -> f32 {
    0.5
}

fn default_prop_tag() -> String {
    "Untagged".to_string()
}

impl LevelDefinition {
    /// Parse and validate a level from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let level: LevelDefinition = toml::from_str(content)?;
        level.validate()?;
        Ok(level)
    }

    /// Load a level file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut level = Self::from_toml_str(&content)?;
        if level.name.is_empty() {
            level.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        tracing::info!(
            name = %level.name,
            obstacles = level.obstacles.len(),
            collectibles = level.collectibles.len(),
            "Level loaded"
        );
        Ok(level)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.robot.position.is_finite() || !self.robot.heading.is_finite() {
            return Err(RobotError::InvalidLevel(format!(
                "robot spawn must be finite, got {:?} heading {}",
                self.robot.position, self.robot.heading
            )));
        }
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if !obstacle.position.is_finite() {
                return Err(RobotError::InvalidLevel(format!(
                    "obstacle {} has non-finite position {:?}",
                    index, obstacle.position
                )));
            }
            if !obstacle.half_extents.is_finite() || obstacle.half_extents.min_element() <= 0.0 {
                return Err(RobotError::InvalidLevel(format!(
                    "obstacle {} has bad half_extents {:?}",
                    index, obstacle.half_extents
                )));
            }
            if obstacle.destructible && obstacle.hits_to_destroy == 0 {
                return Err(RobotError::InvalidLevel(format!(
                    "obstacle {} is destructible with hits_to_destroy = 0",
                    index
                )));
            }
        }
        for (index, collectible) in self.collectibles.iter().enumerate() {
            if !collectible.position.is_finite() {
                return Err(RobotError::InvalidLevel(format!(
                    "collectible {} has non-finite position {:?}",
                    index, collectible.position
                )));
            }
            if !collectible.radius.is_finite() || collectible.radius <= 0.0 {
                return Err(RobotError::InvalidLevel(format!(
                    "collectible {} has bad radius {}",
                    index, collectible.radius
                )));
            }
        }
        for prop in &self.props {
            if !prop.position.is_finite()
                || !prop.half_extents.is_finite()
                || prop.half_extents.min_element() <= 0.0
            {
                return Err(RobotError::InvalidLevel(format!(
                    "prop '{}' has bad geometry: position {:?}, half_extents {:?}",
                    prop.name, prop.position, prop.half_extents
                )));
            }
        }
        Ok(())
    }

    /// Where the robot starts, and where reset puts it back
    pub fn spawn_pose(&self) -> Pose {
        Pose::with_heading(self.robot.position, self.robot.heading)
    }

    /// Instantiate every placed object
    pub fn build_world(&self) -> WorldObjects {
        let mut objects = WorldObjects::new();

        for (index, placed) in self.obstacles.iter().enumerate() {
            let mut obstacle = Obstacle::new(placed.kind);
            if placed.destructible {
                obstacle = obstacle.destructible(placed.hits_to_destroy);
            }
            let name = placed
                .name
                .clone()
                .unwrap_or_else(|| format!("{:?}_{}", placed.kind, index + 1).to_lowercase());
            objects.spawn(WorldObject::obstacle(
                &name,
                placed.position,
                placed.half_extents,
                obstacle,
            ));
        }

        for (index, placed) in self.collectibles.iter().enumerate() {
            let name = placed
                .name
                .clone()
                .unwrap_or_else(|| format!("collectible_{}", index + 1));
            objects.spawn(WorldObject::collectible(
                &name,
                placed.position,
                placed.radius,
                Collectible::default(),
            ));
        }

        for placed in &self.props {
            objects.spawn(WorldObject::prop(
                &placed.name,
                &placed.tag,
                placed.position,
                placed.half_extents,
            ));
        }

        objects
    }
}
