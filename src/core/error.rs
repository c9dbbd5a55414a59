use thiserror::Error;

#[derive(Error, Debug)]
pub enum RobotError {
    #[error("No valid commands to run")]
    NothingToRun,

    #[error("Robot is already executing commands")]
    AlreadyRunning,

    #[error("Unknown command: {0}")]
    UnknownInstruction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RobotError>;
