//! Client error types.
//!
//! [`ClientError`] is the single error type returned by every fallible
//! operation in this crate. Validation errors are raised before any
//! network call; transport errors propagate to the caller so the frontend
//! can report them — a failed submission is never silently swallowed.

use liftlink_models::ModelError;

/// Error type for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The payload was rejected before any network call was made.
    #[error("validation failed: {0}")]
    Validation(#[from] ModelError),

    /// HTTP transport failure (connection, timeout, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// True when the error was raised locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_flagged() {
        let err: ClientError = ModelError::EmptyMessage.into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "validation failed: message text must not be empty"
        );
    }
}
