//! Error types for relief-map

use std::path::PathBuf;

use thiserror::Error;

/// Result type for relief-map operations
pub type ReliefResult<T> = std::result::Result<T, ReliefError>;

/// Errors raised while loading configuration or directory input.
///
/// Data-quality problems inside individual records are never reported
/// through this type; they degrade to "absent" values and are logged.
#[derive(Error, Debug)]
pub enum ReliefError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input document has the wrong overall shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON syntax error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML syntax error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ReliefError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReliefError::Io {
            path: path.into(),
            source,
        }
    }
}
