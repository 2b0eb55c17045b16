//! Error types for the fallible edges of the game
//!
//! The simulation itself never fails; only storage and configuration do.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend is unavailable")]
    Unavailable,

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Malformed value for key {key:?}: {value:?}")]
    Malformed { key: String, value: String },

    #[error("Failed to (de)serialize stored value: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown difficulty: {0:?}")]
    UnknownDifficulty(String),

    #[error("Invalid tuning for {difficulty}: {reason}")]
    InvalidTuning {
        difficulty: &'static str,
        reason: String,
    },

    #[error("Invalid field dimensions {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    #[error("Invalid frame timing: {0}")]
    InvalidTiming(&'static str),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
