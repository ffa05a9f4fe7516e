//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {message}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Config file is not valid JSON for the expected shape.
    #[error("invalid config file {path}: {message}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A setting has an unusable value.
    #[error("invalid value '{value}' for {key}: {message}")]
    InvalidValue {
        /// Setting or environment variable name.
        key: String,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for folio_core::Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
