//! Client error types.

use folio_core::Error as CoreError;
use std::fmt;

/// Errors surfaced by the catalog and profile client.
#[derive(Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, TLS, timeout, broken body.
    Network {
        /// URL that failed.
        url: String,
        /// Error message.
        message: String,
    },
    /// The service answered with a non-success status or envelope.
    Server {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Message from the `{ success: false, message }` shape, or the status text.
        message: String,
    },
    /// Response body did not match the expected envelope.
    ParseError {
        /// URL or source of the JSON.
        source: String,
        /// Error message.
        message: String,
    },
    /// Client could not be configured.
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl ClientError {
    /// Whether this is a transport failure.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Whether the service answered with a failure.
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    pub(crate) fn network(url: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { url, message } => {
                write!(f, "Network error fetching {url}: {message}")
            }
            Self::Server {
                url,
                status,
                message,
            } => write!(f, "HTTP {status} from {url}: {message}"),
            Self::ParseError { source, message } => {
                write!(f, "Failed to parse response from {source}: {message}")
            }
            Self::InvalidConfig { message } => {
                write!(f, "Invalid client configuration: {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for CoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network { url, message } => Self::Network(format!("{url}: {message}")),
            ClientError::Server {
                status, message, ..
            } => Self::Server { status, message },
            ClientError::ParseError { source, message } => Self::Server {
                status: 200,
                message: format!("malformed response from {source}: {message}"),
            },
            ClientError::InvalidConfig { message } => Self::Config(message),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status() {
        let err = ClientError::Server {
            url: "http://api/projects".into(),
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500 from http://api/projects: boom");
        assert!(err.is_server());
        assert!(!err.is_network());
    }

    #[test]
    fn converts_to_core() {
        let err: CoreError = ClientError::network("http://api", "connection refused").into();
        assert!(matches!(err, CoreError::Network(_)));
        assert!(err.is_remote());
    }
}
