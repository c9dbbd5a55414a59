pub mod config;
pub mod error;
pub mod types;

pub use config::{GameConfig, RobotConfig, SimulationSettings};
pub use error::{Result, RobotError};
pub use types::{ObjectId, Pose, COLLECTIBLE_TAG, OBSTACLE_TAG};
