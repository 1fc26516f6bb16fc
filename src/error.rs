//! Storage error type.

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use thiserror::Error;

/// Failure of the table behind the repository.
///
/// "No such record" is never an error; see [`crate::table::Conditional`] and
/// the `Option` returns of [`crate::table::Table`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request to the store failed (transport, throttling, permissions, ...).
    #[error("{operation} failed: {message}")]
    Request {
        /// Store operation that failed.
        operation: &'static str,
        /// Full error chain as reported by the client.
        message: String,
    },
    /// An item could not be converted to or from its stored representation.
    #[error("malformed item: {0}")]
    Serialization(#[from] serde_dynamo::Error),
    /// The store refused to serve requests.
    #[error("store unavailable")]
    Unavailable,
}

impl StoreError {
    /// Wrap an SDK error, keeping its whole source chain in the message.
    pub fn request<E, R>(operation: &'static str, err: SdkError<E, R>) -> Self
    where
        E: std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        Self::Request {
            operation,
            message: DisplayErrorContext(&err).to_string(),
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        let error = StoreError::Request {
            operation: "Scan",
            message: "throttled".to_string(),
        };
        assert_eq!(error.to_string(), "Scan failed: throttled");
    }

    #[test]
    fn test_unavailable_display() {
        assert_eq!(StoreError::Unavailable.to_string(), "store unavailable");
    }
}
