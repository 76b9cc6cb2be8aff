//! Notification Service Interface
//!
//! Defines the trait for delivery channel implementations that carry
//! verification codes and other short notifications to a contact address.

use async_trait::async_trait;

use ll_core::domain::entities::verification_session::DeliveryMethod;
use ll_shared::utils::contact::{is_valid_email, is_valid_phone};

use crate::InfrastructureError;

/// Notification service trait for delivering short messages
///
/// Implementations include:
/// - HTTP notification gateway
/// - Mock implementation for development
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Deliver a message to a contact address
    ///
    /// # Arguments
    ///
    /// * `recipient` - Email address or E.164 phone number
    /// * `method` - Channel the message goes out over
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If delivery fails
    async fn deliver(
        &self,
        recipient: &str,
        method: DeliveryMethod,
        message: &str,
    ) -> Result<String, InfrastructureError>;

    /// Deliver a verification code
    ///
    /// Convenience method that formats the code message according to the
    /// application's standard wording.
    async fn deliver_verification_code(
        &self,
        recipient: &str,
        method: DeliveryMethod,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let message = format!(
            "Your LabLend verification code is: {}. This code will expire in {} minutes.",
            code, expires_in_minutes
        );
        self.deliver(recipient, method, &message).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Validate a recipient address against the chosen delivery method
pub fn is_valid_recipient(recipient: &str, method: DeliveryMethod) -> bool {
    match method {
        DeliveryMethod::Email => is_valid_email(recipient),
        DeliveryMethod::Sms => is_valid_phone(recipient),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_recipient() {
        assert!(is_valid_recipient("student@lab.edu", DeliveryMethod::Email));
        assert!(is_valid_recipient("+61412345678", DeliveryMethod::Sms));

        // Address valid for one channel is not valid for the other
        assert!(!is_valid_recipient("student@lab.edu", DeliveryMethod::Sms));
        assert!(!is_valid_recipient("+61412345678", DeliveryMethod::Email));
    }
}
