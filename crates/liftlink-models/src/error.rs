//! Error types for the `liftlink-models` crate.
//!
//! All validation performed before a payload leaves the client returns
//! variants of [`ModelError`]. Local computation itself never fails;
//! these errors exist so that an invalid submission is rejected before
//! any network call is made.

/// Errors produced when validating outbound payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A chat message was empty or whitespace-only.
    #[error("message text must not be empty")]
    EmptyMessage,

    /// A lift submission contained no rows with jumpers and no
    /// operator-supplied totals.
    #[error("lift {id} has no rows with jumpers and no explicit totals")]
    EmptyLift {
        /// The id the submission would have been sent with.
        id: u32,
    },

    /// An explicit lift id was supplied but was not a positive integer.
    #[error("invalid lift id \"{value}\": {reason}")]
    InvalidLiftId {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_empty_message() {
        assert_eq!(
            ModelError::EmptyMessage.to_string(),
            "message text must not be empty"
        );
    }

    #[test]
    fn error_display_empty_lift() {
        let err = ModelError::EmptyLift { id: 7 };
        assert_eq!(
            err.to_string(),
            "lift 7 has no rows with jumpers and no explicit totals"
        );
    }

    #[test]
    fn error_display_invalid_id() {
        let err = ModelError::InvalidLiftId {
            value: "0".into(),
            reason: "must be a positive integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid lift id \"0\": must be a positive integer"
        );
    }
}
