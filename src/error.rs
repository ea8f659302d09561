//! Error types for cleaner registration and execution

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading host configuration or running cleanup actions.
#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A `--param` override that is not `key=value`
    #[error("invalid parameter '{0}', expected key=value")]
    InvalidParameter(String),

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CleanupError>;
