//! Error types for monster-pipeline
//!
//! The taxonomy mirrors how the pipeline reacts to a failure:
//! - [`Error::Transient`] is retried with bounded backoff, then escalated
//! - [`Error::Permanent`] is surfaced immediately, never retried
//! - [`Error::SchemaValidation`] signals an upstream contract break and is fatal
//! - everything else is a fatal local failure (configuration, filesystem)

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run or client configuration
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the invalid setting
        message: String,
    },

    /// Transient upstream failure (timeout, connection failure, 5xx status)
    #[error("transient error: {message}")]
    Transient {
        /// Description of the failed request
        message: String,
    },

    /// Permanent upstream rejection (4xx status, malformed reference URI)
    #[error("permanent error: {message}")]
    Permanent {
        /// Description of the rejected request
        message: String,
    },

    /// A response violated the expected schema (missing or invalid field)
    #[error("schema validation error: {0}")]
    SchemaValidation(String),

    /// The requested sample size exceeds the available catalog window
    #[error("insufficient data: requested {requested} entries but only {available} available")]
    InsufficientData {
        /// Number of entries requested
        requested: usize,
        /// Number of entries actually available
        available: usize,
    },

    /// Filesystem failure while persisting the result
    #[error("write error: {0}")]
    Write(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    /// Classify a transport-level error.
    ///
    /// Timeouts and connection failures are transient. Body-decode failures
    /// indicate the service sent something other than the agreed schema.
    /// Anything else (resets mid-request, protocol errors) is treated as
    /// transient so the retry policy gets a chance at it.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Error::Transient {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Error::SchemaValidation(err.to_string())
        } else {
            Error::Transient {
                message: err.to_string(),
            }
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_counts_for_insufficient_data() {
        let err = Error::InsufficientData {
            requested: 5,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'), "message should name the requested count");
        assert!(msg.contains('3'), "message should name the available count");
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn serde_error_converts_via_from() {
        let err: Error = serde_json::from_str::<String>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
