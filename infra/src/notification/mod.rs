//! Notification Module
//!
//! This module provides notification delivery implementations for carrying
//! verification codes to a contact address over email or SMS. It includes a
//! mock implementation for development and a thin HTTP gateway client for
//! production, plus the adapter that plugs either into the verification
//! core.

pub mod http_gateway;
pub mod mock;
pub mod notification_service;
pub mod sink_adapter;

// Re-export commonly used types
pub use http_gateway::{HttpGatewayConfig, HttpGatewayService};
pub use mock::{MockNotificationService, SentNotification};
pub use notification_service::{is_valid_recipient, NotificationService};
pub use sink_adapter::NotificationSinkAdapter;

use crate::config::NotificationConfig;

/// Create a notification service based on configuration
///
/// Returns the implementation selected by `config.provider`, falling back
/// to the mock implementation when the gateway is misconfigured.
pub fn create_notification_service(config: &NotificationConfig) -> Box<dyn NotificationService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockNotificationService::new()),
        "http" => {
            let gateway_config = HttpGatewayConfig {
                base_url: config.gateway_url.clone(),
                api_key: config.api_key.clone(),
                from_identity: config.from_identity.clone(),
                ..Default::default()
            };

            match HttpGatewayService::new(gateway_config) {
                Ok(service) => Box::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize HTTP notification gateway: {}", e);
                    tracing::warn!("Falling back to mock notification service");
                    Box::new(MockNotificationService::new())
                }
            }
        }
        other => {
            tracing::warn!(
                "Unknown notification provider '{}', using mock implementation",
                other
            );
            Box::new(MockNotificationService::new())
        }
    }
}
