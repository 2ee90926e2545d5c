//! Centralized error types for oft2eml.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the oft2eml library.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("Template file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file is not an Outlook template (not a compound file, or unreadable).
    #[error("Not a valid Outlook template '{path}': {reason}")]
    InvalidTemplate { path: PathBuf, reason: String },

    /// A MAPI property stream could not be decoded.
    #[error("Cannot decode property {name}: {reason}")]
    Property { name: String, reason: String },

    /// Assembling or serializing the MIME message failed.
    #[error("MIME assembly error: {0}")]
    Mime(String),

    /// An invalid path was provided.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an `InvalidTemplate` variant.
    pub fn invalid(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidTemplate {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (rare; prefer `ConvertError::io`).
impl From<std::io::Error> for ConvertError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
