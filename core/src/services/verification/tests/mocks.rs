//! Mock implementations for testing the verification service

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::verification_session::DeliveryMethod;
use crate::errors::DeliveryError;
use crate::services::verification::traits::{Clock, NotificationSink};

/// Recording notification sink for tests
pub struct MockNotificationSink {
    /// Dispatched messages: contact -> (code, method)
    pub sent: Arc<Mutex<HashMap<String, (String, DeliveryMethod)>>>,
    pub should_fail: bool,
}

impl MockNotificationSink {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn sent_code(&self, contact: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .get(contact)
            .map(|(code, _)| code.clone())
    }

    pub fn sent_method(&self, contact: &str) -> Option<DeliveryMethod> {
        self.sent
            .lock()
            .unwrap()
            .get(contact)
            .map(|(_, method)| *method)
    }

    /// Wait for the fire-and-forget dispatch task to reach the sink
    pub async fn wait_for_code(&self, contact: &str) -> String {
        for _ in 0..100 {
            if let Some(code) = self.sent_code(contact) {
                return code;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("no code dispatched to {}", contact);
    }
}

#[async_trait]
impl NotificationSink for MockNotificationSink {
    async fn send(
        &self,
        contact: &str,
        code: &str,
        method: DeliveryMethod,
    ) -> Result<String, DeliveryError> {
        if self.should_fail {
            return Err(DeliveryError::Transport {
                message: "simulated sink failure".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .insert(contact.to_string(), (code.to_string(), method));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

/// Manually advanced clock for tests
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + duration;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Fixed start instant shared by the unit tests
pub fn test_epoch() -> DateTime<Utc> {
    "2026-03-01T10:00:00Z".parse().unwrap()
}
