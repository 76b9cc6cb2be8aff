//! Error types for the verification lifecycle
//!
//! `VerificationError` covers everything `submit`/`resend` can report back
//! to the caller; `DeliveryError` is the notification sink's failure
//! contract. Presentation-layer codes live in `ll_shared::error_codes`.

use ll_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Failures of a verification attempt, reported synchronously to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification code must be exactly 6 digits")]
    InvalidCodeFormat,

    #[error("Incorrect verification code. {attempts_remaining} attempt(s) remaining")]
    IncorrectCode { attempts_remaining: u32 },

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Maximum verification attempts exceeded")]
    AttemptsExhausted,

    #[error("Session already verified")]
    AlreadyVerified,

    #[error("No verification code has been issued")]
    CodeNotIssued,

    #[error("Please wait {seconds} seconds before requesting a new code")]
    ResendCooldown { seconds: i64 },
}

/// Failures of the notification sink
///
/// Delivery is best-effort: these are logged by the dispatcher and never
/// block the verification flow.
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    #[error("Invalid recipient: {recipient}")]
    InvalidRecipient { recipient: String },

    #[error("Transport failure: {message}")]
    Transport { message: String },
}

/// Convert VerificationError to ErrorResponse
impl From<VerificationError> for ErrorResponse {
    fn from(err: VerificationError) -> Self {
        let error_code = match &err {
            VerificationError::InvalidCodeFormat => error_codes::VERIFICATION_CODE_FORMAT,
            VerificationError::IncorrectCode { .. } => error_codes::VERIFICATION_CODE_INVALID,
            VerificationError::CodeExpired => error_codes::VERIFICATION_CODE_EXPIRED,
            VerificationError::AttemptsExhausted => error_codes::MAX_ATTEMPTS_EXCEEDED,
            VerificationError::AlreadyVerified => error_codes::ALREADY_VERIFIED,
            VerificationError::CodeNotIssued => error_codes::VERIFICATION_CODE_NOT_ISSUED,
            VerificationError::ResendCooldown { .. } => error_codes::RESEND_COOLDOWN,
        };

        let response = ErrorResponse::new(error_code, err.to_string());
        match err {
            VerificationError::IncorrectCode { attempts_remaining } => {
                response.add_detail("attempts_remaining", attempts_remaining)
            }
            VerificationError::ResendCooldown { seconds } => {
                response.add_detail("retry_after_seconds", seconds)
            }
            _ => response,
        }
    }
}

/// Convert DeliveryError to ErrorResponse
impl From<DeliveryError> for ErrorResponse {
    fn from(err: DeliveryError) -> Self {
        let error_code = match &err {
            DeliveryError::InvalidRecipient { .. } => error_codes::CONTACT_INVALID,
            DeliveryError::Transport { .. } => error_codes::DELIVERY_ERROR,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_code_message_carries_remaining() {
        let err = VerificationError::IncorrectCode {
            attempts_remaining: 2,
        };
        assert!(err.to_string().contains("2 attempt(s) remaining"));
    }

    #[test]
    fn test_incorrect_code_response_detail() {
        let response: ErrorResponse = VerificationError::IncorrectCode {
            attempts_remaining: 3,
        }
        .into();

        assert_eq!(response.error, error_codes::VERIFICATION_CODE_INVALID);
        assert_eq!(response.details.unwrap()["attempts_remaining"], 3);
    }

    #[test]
    fn test_cooldown_response_detail() {
        let response: ErrorResponse = VerificationError::ResendCooldown { seconds: 42 }.into();

        assert_eq!(response.error, error_codes::RESEND_COOLDOWN);
        assert_eq!(response.details.unwrap()["retry_after_seconds"], 42);
    }

    #[test]
    fn test_delivery_error_conversion() {
        let response: ErrorResponse = DeliveryError::Transport {
            message: "gateway unreachable".to_string(),
        }
        .into();

        assert_eq!(response.error, error_codes::DELIVERY_ERROR);
        assert!(response.message.contains("gateway unreachable"));
    }
}
