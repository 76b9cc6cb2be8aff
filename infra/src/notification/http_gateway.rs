//! HTTP Notification Gateway Implementation
//!
//! A thin wrapper over an external notification gateway that performs the
//! actual email/SMS delivery. The gateway exposes a single JSON endpoint;
//! this client adds authentication, timeouts, and retry with exponential
//! backoff.
//!
//! ## Features
//!
//! - Email and SMS dispatch through one endpoint
//! - Automatic retry logic with exponential backoff
//! - Rate limiting handling (HTTP 429)
//! - Security: contact masking in logs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use ll_core::domain::entities::verification_session::DeliveryMethod;
use ll_shared::utils::contact::mask_contact;

use super::notification_service::{is_valid_recipient, NotificationService};
use crate::InfrastructureError;

/// HTTP gateway configuration
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Gateway base URL
    pub base_url: String,
    /// Gateway API key (sent as a bearer token)
    pub api_key: String,
    /// Sender identity shown to recipients
    pub from_identity: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            from_identity: "LabLend".to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl HttpGatewayConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let base_url = std::env::var("NOTIFY_GATEWAY_URL")
            .map_err(|_| InfrastructureError::Config("NOTIFY_GATEWAY_URL not set".to_string()))?;
        let api_key = std::env::var("NOTIFY_GATEWAY_API_KEY").map_err(|_| {
            InfrastructureError::Config("NOTIFY_GATEWAY_API_KEY not set".to_string())
        })?;

        Ok(Self {
            base_url,
            api_key,
            from_identity: std::env::var("NOTIFY_FROM_IDENTITY")
                .unwrap_or_else(|_| "LabLend".to_string()),
            max_retries: std::env::var("NOTIFY_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("NOTIFY_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            request_timeout_secs: std::env::var("NOTIFY_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Request body accepted by the gateway's message endpoint
#[derive(Debug, Serialize)]
struct DeliveryRequest<'a> {
    to: &'a str,
    channel: &'a str,
    body: &'a str,
    sender: &'a str,
}

/// Response body returned by the gateway on acceptance
#[derive(Debug, Deserialize)]
struct DeliveryResponse {
    message_id: String,
}

/// HTTP notification gateway client
pub struct HttpGatewayService {
    client: reqwest::Client,
    config: HttpGatewayConfig,
}

impl HttpGatewayService {
    /// Create a new HTTP gateway service
    pub fn new(config: HttpGatewayConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "Notification gateway base URL is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            gateway = %config.base_url,
            "HTTP notification gateway initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = HttpGatewayConfig::from_env()?;
        Self::new(config)
    }

    async fn post_with_retry(
        &self,
        payload: &DeliveryRequest<'_>,
        recipient: &str,
    ) -> Result<String, InfrastructureError> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let masked = mask_contact(recipient);
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut last_error: Option<InfrastructureError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                debug!(
                    attempt,
                    recipient = %masked,
                    "Retrying notification gateway request"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }

            match self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(payload)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: DeliveryResponse = response.json().await?;
                        info!(
                            recipient = %masked,
                            message_id = %body.message_id,
                            "Notification accepted by gateway"
                        );
                        return Ok(body.message_id);
                    }

                    if status.as_u16() == 429 || status.is_server_error() {
                        warn!(
                            recipient = %masked,
                            status = %status,
                            "Gateway returned retryable error"
                        );
                        last_error = Some(InfrastructureError::Notification(format!(
                            "Gateway returned status {}",
                            status
                        )));
                        continue;
                    }

                    let text = response.text().await.unwrap_or_default();
                    error!(
                        recipient = %masked,
                        status = %status,
                        "Gateway rejected notification"
                    );
                    return Err(InfrastructureError::Notification(format!(
                        "Gateway rejected request ({}): {}",
                        status, text
                    )));
                }
                Err(err) => {
                    warn!(
                        recipient = %masked,
                        error = %err,
                        "Gateway request failed"
                    );
                    last_error = Some(InfrastructureError::Http(err));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            InfrastructureError::Notification("Notification gateway unreachable".to_string())
        }))
    }
}

#[async_trait]
impl NotificationService for HttpGatewayService {
    async fn deliver(
        &self,
        recipient: &str,
        method: DeliveryMethod,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_recipient(recipient, method) {
            return Err(InfrastructureError::Notification(format!(
                "Invalid {} recipient: {}",
                method,
                mask_contact(recipient)
            )));
        }

        let payload = DeliveryRequest {
            to: recipient,
            channel: method.as_str(),
            body: message,
            sender: &self.config.from_identity,
        };

        self.post_with_retry(&payload, recipient).await
    }

    fn provider_name(&self) -> &str {
        "HTTP Gateway"
    }
}
