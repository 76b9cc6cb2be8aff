//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{DeliveryError, VerificationError};

use ll_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.as_str())
            }
            DomainError::NotFound { resource } => ErrorResponse::new(
                error_codes::NOT_FOUND,
                format!("Resource not found: {}", resource),
            ),
            DomainError::Internal { message } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, message.as_str())
            }
            DomainError::Verification(err) => err.clone().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_response() {
        let err = DomainError::NotFound {
            resource: "verification session".to_string(),
        };
        let response = err.to_error_response();
        assert_eq!(response.error, error_codes::NOT_FOUND);
        assert!(response.message.contains("verification session"));
    }

    #[test]
    fn test_verification_error_passes_through() {
        let err = DomainError::Verification(VerificationError::CodeExpired);
        let response = err.to_error_response();
        assert_eq!(response.error, error_codes::VERIFICATION_CODE_EXPIRED);
    }
}
