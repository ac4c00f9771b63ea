//! Error types for filmdex.
//!
//! Library crates use [`FilmdexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Only a handful of conditions are errors at all: extraction absorbs missing
//! or malformed optional fields by leaving them out of the result.

use std::path::PathBuf;

/// Top-level error type for all filmdex operations.
#[derive(Debug, thiserror::Error)]
pub enum FilmdexError {
    /// The page's mandatory title/name marker is absent: the requested code
    /// does not correspond to a retrievable record.
    #[error("unable to get {kind}ID \"{id}\"")]
    DataAccess { kind: RecordKind, id: String },

    /// Network/HTTP error during retrieval.
    #[error("network error: {0}")]
    Network(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid caller input (malformed identity code, empty query, ...).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Which kind of record a [`FilmdexError::DataAccess`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Movie,
    Person,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => f.write_str("movie"),
            Self::Person => f.write_str("person"),
        }
    }
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FilmdexError>;

impl FilmdexError {
    /// Hard failure for a movie page without its title marker.
    pub fn missing_movie(id: impl Into<String>) -> Self {
        Self::DataAccess {
            kind: RecordKind::Movie,
            id: id.into(),
        }
    }

    /// Hard failure for a person page without its name marker.
    pub fn missing_person(id: impl Into<String>) -> Self {
        Self::DataAccess {
            kind: RecordKind::Person,
            id: id.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The requested identity code, for hard failures.
    pub fn requested_id(&self) -> Option<&str> {
        match self {
            Self::DataAccess { id, .. } => Some(id),
            _ => None,
        }
    }
}
