//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the LabLend backend.
//! It provides concrete notification sink implementations the verification
//! core dispatches codes through:
//!
//! - **Mock**: Console/logging implementation for development and tests
//! - **HTTP gateway**: Thin wrapper over an external notification gateway

// Re-export core error types for convenience
pub use ll_core::errors::*;

/// Notification module - External delivery channels
pub mod notification;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services

    use ll_shared::Environment;
    use serde::{Deserialize, Serialize};

    /// Notification service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct NotificationConfig {
        /// Delivery provider ("mock", "http")
        pub provider: String,
        /// Gateway base URL (http provider)
        pub gateway_url: String,
        /// Gateway API key (http provider)
        pub api_key: String,
        /// Sender identity shown to recipients
        pub from_identity: String,
    }

    impl Default for NotificationConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                gateway_url: String::new(),
                api_key: String::new(),
                from_identity: "LabLend".to_string(),
            }
        }
    }

    /// Load notification configuration from environment variables
    ///
    /// Outside of production the provider defaults to the mock
    /// implementation.
    pub fn load_notification_config() -> NotificationConfig {
        dotenvy::dotenv().ok(); // Load .env file if present

        let environment = Environment::from_env();
        let default_provider = if environment.is_production() {
            "http"
        } else {
            "mock"
        };

        NotificationConfig {
            provider: std::env::var("NOTIFY_PROVIDER")
                .unwrap_or_else(|_| default_provider.to_string()),
            gateway_url: std::env::var("NOTIFY_GATEWAY_URL").unwrap_or_default(),
            api_key: std::env::var("NOTIFY_GATEWAY_API_KEY").unwrap_or_default(),
            from_identity: std::env::var("NOTIFY_FROM_IDENTITY")
                .unwrap_or_else(|_| "LabLend".to_string()),
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery error
    #[error("Notification error: {0}")]
    Notification(String),
}
