//! Notification Sink Adapter
//!
//! Bridges the infrastructure delivery trait to the core `NotificationSink`
//! trait the verification service dispatches through.

use async_trait::async_trait;

use ll_core::domain::entities::verification_session::DeliveryMethod;
use ll_core::errors::DeliveryError;
use ll_core::services::verification::NotificationSink;
use ll_shared::utils::contact::mask_contact;

use super::notification_service::{is_valid_recipient, NotificationService};

/// Adapter that implements the core NotificationSink over any delivery
/// service implementation
pub struct NotificationSinkAdapter {
    inner: Box<dyn NotificationService>,
    code_ttl_minutes: i64,
}

impl NotificationSinkAdapter {
    /// Create a new sink adapter
    ///
    /// # Arguments
    ///
    /// * `inner` - The delivery service to dispatch through
    /// * `code_ttl_seconds` - Validity window quoted in the code message
    pub fn new(inner: Box<dyn NotificationService>, code_ttl_seconds: i64) -> Self {
        Self {
            inner,
            code_ttl_minutes: (code_ttl_seconds / 60).max(1),
        }
    }
}

#[async_trait]
impl NotificationSink for NotificationSinkAdapter {
    async fn send(
        &self,
        contact: &str,
        code: &str,
        method: DeliveryMethod,
    ) -> Result<String, DeliveryError> {
        if !is_valid_recipient(contact, method) {
            return Err(DeliveryError::InvalidRecipient {
                recipient: mask_contact(contact),
            });
        }

        self.inner
            .deliver_verification_code(contact, method, code, self.code_ttl_minutes)
            .await
            .map_err(|e| DeliveryError::Transport {
                message: e.to_string(),
            })
    }
}
