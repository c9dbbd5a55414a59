//! World objects, contact detection and level loading

pub mod collectible;
pub mod collision;
pub mod loader;
pub mod objects;
pub mod obstacle;

pub use collectible::Collectible;
pub use collision::{Collider, ContactTracker, WorldSignal};
pub use loader::{LevelDefinition, DEFAULT_LEVEL_PATH};
pub use objects::{ObjectBody, WorldObject, WorldObjects};
pub use obstacle::{Obstacle, ObstacleKind};
