//! Error types for Folio operations.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Folio.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure reaching the catalog or profile service.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status or envelope.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error envelope, or the status text.
        message: String,
    },

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] sonic_rs::Error),

    /// IO error.
    #[error("io error at {path}: {message}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Session cache error.
    #[error("cache error: {0}")]
    Cache(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create an IO error with context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether the error came from talking to the remote service.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

/// Result type for Folio operations.
pub type Result<T> = std::result::Result<T, Error>;
