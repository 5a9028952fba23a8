//! ACL error types.
//!
//! Predicates never fail. These errors only come out of construction-time
//! work: parsing tags, and parsing or loading a catalog.

use thiserror::Error;

/// ACL errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The text is not a known tag of the given kind.
    #[error("unknown {kind}: '{value}'")]
    UnknownTag { kind: &'static str, value: String },

    /// The catalog content is semantically invalid.
    #[error("invalid catalog: {0}")]
    Invalid(String),

    /// Failed to parse a catalog file.
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// An I/O error occurred while reading a catalog.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
