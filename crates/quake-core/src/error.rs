//! Error types for the quake feed cache.
//!
//! Upstream failures (fetch and parse) are kept verbatim so callers can tell a
//! flaky network apart from a malformed feed. Errors are `Clone` because a
//! cache entry remembers its last failure and hands it back to later callers.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the quake library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuakeError {
    // Cache errors
    #[error("failure on caching earthquake collection")]
    CacheFailure,

    #[error("earthquake not found: {id}")]
    NotFound { id: String },

    // Fetch errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// HTTP status code when the server answered with a non-success status
        status_code: Option<u16>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    // Parse errors
    #[error("Parse error: {message}")]
    Parse { message: String },

    // Input errors
    #[error("Invalid value for {field}: {message}")]
    InvalidArgument { field: String, message: String },
}

/// Result type alias for quake operations.
pub type Result<T> = std::result::Result<T, QuakeError>;

/// Coarse classification of a [`QuakeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Cache,
    NotFound,
    Fetch,
    Parse,
    Input,
}

impl From<serde_json::Error> for QuakeError {
    fn from(err: serde_json::Error) -> Self {
        QuakeError::Parse {
            message: err.to_string(),
        }
    }
}

// Timeouts are mapped by the source, which knows its configured duration.
impl From<reqwest::Error> for QuakeError {
    fn from(err: reqwest::Error) -> Self {
        QuakeError::Network {
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
        }
    }
}

impl QuakeError {
    /// Create a parse error from any displayable message.
    pub fn parse(message: impl Into<String>) -> Self {
        QuakeError::Parse {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuakeError::CacheFailure => ErrorKind::Cache,
            QuakeError::NotFound { .. } => ErrorKind::NotFound,
            QuakeError::Network { .. } | QuakeError::Timeout(_) => ErrorKind::Fetch,
            QuakeError::Parse { .. } => ErrorKind::Parse,
            QuakeError::InvalidArgument { .. } => ErrorKind::Input,
        }
    }

    /// Check if this error is a transient upstream failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuakeError::Network { .. } | QuakeError::Timeout(_))
    }
}
