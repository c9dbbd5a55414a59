//! Game configuration with documented constants
//!
//! Loaded from `data/robot.toml` when present. Every field falls back to the
//! default below, so a partial file only overrides what it names.

use crate::core::error::{Result, RobotError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "data/robot.toml";

/// Motion tuning for the robot actor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RobotConfig {
    /// Forward speed in world units per second
    ///
    /// `MOVE_FORWARD(d)` takes `d / move_speed` seconds.
    pub move_speed: f32,

    /// Turning speed in degrees per second
    ///
    /// `ROTATE(r)` takes `|r| / rotation_speed` seconds.
    pub rotation_speed: f32,

    /// Pause inserted after every instruction (seconds)
    ///
    /// Gives the player a visible beat between steps.
    pub command_pause: f32,

    /// Radius of the robot's collision sphere (world units)
    pub collision_radius: f32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            rotation_speed: 90.0,
            command_pause: 0.2,
            collision_radius: 0.5,
        }
    }
}

impl RobotConfig {
    pub fn validate(&self) -> Result<()> {
        if self.move_speed <= 0.0 || !self.move_speed.is_finite() {
            return Err(RobotError::InvalidConfig(format!(
                "move_speed must be positive, got {}",
                self.move_speed
            )));
        }
        if self.rotation_speed <= 0.0 || !self.rotation_speed.is_finite() {
            return Err(RobotError::InvalidConfig(format!(
                "rotation_speed must be positive, got {}",
                self.rotation_speed
            )));
        }
        if self.command_pause < 0.0 || !self.command_pause.is_finite() {
            return Err(RobotError::InvalidConfig(format!(
                "command_pause must not be negative, got {}",
                self.command_pause
            )));
        }
        if self.collision_radius <= 0.0 || !self.collision_radius.is_finite() {
            return Err(RobotError::InvalidConfig(format!(
                "collision_radius must be positive, got {}",
                self.collision_radius
            )));
        }
        Ok(())
    }
}

/// Host loop settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    /// Seconds advanced per simulation tick
    pub fixed_timestep: f32,

    /// Upper bound on simulated seconds for one headless run
    pub max_run_seconds: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_run_seconds: 120.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub robot: RobotConfig,
    pub simulation: SimulationSettings,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the config file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.robot.validate()?;
        if self.simulation.fixed_timestep <= 0.0 || !self.simulation.fixed_timestep.is_finite() {
            return Err(RobotError::InvalidConfig(format!(
                "fixed_timestep must be positive, got {}",
                self.simulation.fixed_timestep
            )));
        }
        if self.simulation.max_run_seconds <= 0.0 || !self.simulation.max_run_seconds.is_finite() {
            return Err(RobotError::InvalidConfig(format!(
                "max_run_seconds must be positive, got {}",
                self.simulation.max_run_seconds
            )));
        }
        Ok(())
    }
}
