//! Mock Notification Service Implementation
//!
//! A mock implementation of the notification service for development and
//! testing. Messages are logged to the console instead of being sent.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use ll_core::domain::entities::verification_session::DeliveryMethod;
use ll_shared::utils::contact::mask_contact;

use super::notification_service::{is_valid_recipient, NotificationService};
use crate::InfrastructureError;

/// A message the mock has "delivered"
#[derive(Debug, Clone)]
pub struct SentNotification {
    pub recipient: String,
    pub method: DeliveryMethod,
    pub body: String,
}

/// Mock notification service for development and testing
///
/// This implementation:
/// - Logs messages to console
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Records delivered messages for test assertions
#[derive(Clone)]
pub struct MockNotificationService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Messages delivered so far
    sent: Arc<Mutex<Vec<SentNotification>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockNotificationService {
    /// Create a new mock notification service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Most recent message delivered to a recipient
    pub fn last_message_to(&self, recipient: &str) -> Option<SentNotification> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .cloned()
    }
}

impl Default for MockNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn deliver(
        &self,
        recipient: &str,
        method: DeliveryMethod,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        // Validate recipient address
        if !is_valid_recipient(recipient, method) {
            return Err(InfrastructureError::Notification(format!(
                "Invalid {} recipient: {}",
                method,
                mask_contact(recipient)
            )));
        }

        // Simulate failure if configured
        if self.simulate_failure {
            warn!(
                "Mock notification service simulating failure for recipient: {}",
                mask_contact(recipient)
            );
            return Err(InfrastructureError::Notification(
                "Simulated delivery failure".to_string(),
            ));
        }

        // Generate mock message ID
        let message_id = format!("mock_{}", Uuid::new_v4());

        // Increment message counter
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        let masked = mask_contact(recipient);

        if self.console_output {
            // Console output for development - show full message
            println!("\n{}", "=".repeat(60));
            println!("📨 MOCK NOTIFICATION SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} via {} (masked: {})", recipient, method, masked);
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        // Structured logging for production
        info!(
            target: "notification_service",
            provider = "mock",
            recipient = %masked,
            method = %method,
            message_id = %message_id,
            message_length = message.len(),
            "Notification sent successfully (mock)"
        );

        self.sent.lock().unwrap().push(SentNotification {
            recipient: recipient.to_string(),
            method,
            body: message.to_string(),
        });

        // Simulate network delay
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_deliver_success() {
        let service = MockNotificationService::with_options(false, false);
        let result = service
            .deliver("student@lab.edu", DeliveryMethod::Email, "Test message")
            .await;

        assert!(result.is_ok());
        let message_id = result.unwrap();
        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.get_message_count(), 1);

        let sent = service.last_message_to("student@lab.edu").unwrap();
        assert_eq!(sent.method, DeliveryMethod::Email);
        assert_eq!(sent.body, "Test message");
    }

    #[tokio::test]
    async fn test_mock_deliver_invalid_recipient() {
        let service = MockNotificationService::with_options(false, false);
        let result = service
            .deliver("not-an-email", DeliveryMethod::Email, "Test message")
            .await;

        assert!(result.is_err());
        if let Err(InfrastructureError::Notification(msg)) = result {
            assert!(msg.contains("Invalid email recipient"));
        } else {
            panic!("Expected Notification error");
        }
        assert_eq!(service.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_simulate_failure() {
        let service = MockNotificationService::with_options(false, true);

        let result = service
            .deliver("+61412345678", DeliveryMethod::Sms, "Test message")
            .await;
        assert!(result.is_err());
        assert!(!service.is_available().await);
    }

    #[tokio::test]
    async fn test_mock_verification_code_message() {
        let service = MockNotificationService::with_options(false, false);
        let result = service
            .deliver_verification_code("+61412345678", DeliveryMethod::Sms, "042531", 5)
            .await;

        assert!(result.is_ok());
        let sent = service.last_message_to("+61412345678").unwrap();
        assert!(sent.body.contains("042531"));
        assert!(sent.body.contains("5 minutes"));
    }

    #[tokio::test]
    async fn test_mock_counter() {
        let service = MockNotificationService::with_options(false, false);

        for i in 1..=3 {
            let _ = service
                .deliver(
                    "student@lab.edu",
                    DeliveryMethod::Email,
                    &format!("Message {}", i),
                )
                .await;
            assert_eq!(service.get_message_count(), i);
        }

        service.reset_counter();
        assert_eq!(service.get_message_count(), 0);
    }

    #[test]
    fn test_provider_name() {
        let service = MockNotificationService::new();
        assert_eq!(service.provider_name(), "Mock");
    }
}
