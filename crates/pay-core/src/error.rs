//! # Payment Error Types
//!
//! Typed error handling for the cube-checkout gateway integration.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Gateway credentials or settings are missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request fields are missing or invalid (user-correctable)
    #[error("{0}")]
    Validation(String),

    /// Callback arrived without the payload or the signature
    #[error("Missing fields: {0}")]
    MissingFields(String),

    /// Callback signature does not match the payload
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Callback payload could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Verified callback does not match what the order expected
    #[error("Expectation mismatch on {field}: expected {expected}, got {actual}")]
    ExpectationMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// Order fulfillment collaborator failed
    #[error("Fulfillment error: {0}")]
    Fulfillment(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::Validation(_) => 400,
            PaymentError::MissingFields(_) => 400,
            PaymentError::SignatureMismatch => 400,
            PaymentError::MalformedPayload(_) => 400,
            PaymentError::ExpectationMismatch { .. } => 400,
            PaymentError::Fulfillment(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }

    /// Returns true if the error came from an untrusted callback.
    ///
    /// These collapse to a generic rejection at the HTTP boundary.
    pub fn is_callback_rejection(&self) -> bool {
        matches!(
            self,
            PaymentError::MissingFields(_)
                | PaymentError::SignatureMismatch
                | PaymentError::MalformedPayload(_)
        )
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
