//! Configuration for the verification service

use crate::domain::entities::verification_session::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TTL_SECONDS};

/// Validity window for the elevated/admin confirmation flow
pub const ELEVATED_TTL_SECONDS: i64 = 600;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Seconds before an issued code expires
    pub ttl_seconds: i64,
    /// Maximum number of guesses allowed per issued code
    pub max_attempts: u32,
    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            resend_cooldown_seconds: 60,
        }
    }
}

impl VerificationServiceConfig {
    /// Configuration for the elevated/admin flow, which grants the caller a
    /// longer entry window than the login flow
    pub fn elevated() -> Self {
        Self {
            ttl_seconds: ELEVATED_TTL_SECONDS,
            ..Default::default()
        }
    }

    /// Override the validity window
    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Override the attempt cap
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Override the resend cooldown
    pub fn with_resend_cooldown_seconds(mut self, seconds: i64) -> Self {
        self.resend_cooldown_seconds = seconds;
        self
    }
}
