//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The identity snapshot file does not exist.
    #[error("identity file not found at {path}")]
    IdentityNotFound { path: PathBuf },

    /// The identity snapshot is not valid JSON of the expected shape.
    #[error("invalid identity file {path}: {source}")]
    InvalidIdentity {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
