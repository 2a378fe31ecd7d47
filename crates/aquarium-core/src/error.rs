//! Error type shared by the engine, configuration and persistence.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AquariumError {
    #[error("Invalid spawn size: {size}")]
    InvalidSpawn { size: f32 },

    #[error("Point ({x:.1}, {y:.1}) is outside the tank")]
    OutOfTank { x: f32, y: f32 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

pub type Result<T> = std::result::Result<T, AquariumError>;
