//! Traits for notification sink and clock integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_session::DeliveryMethod;
use crate::errors::DeliveryError;

/// Trait for the external notification channel
///
/// Delivery is best-effort: the verification service dispatches codes
/// asynchronously and treats failures as observability events, never as
/// state-machine input.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a verification code to a contact address
    ///
    /// Returns the provider's message identifier on success.
    async fn send(
        &self,
        contact: &str,
        code: &str,
        method: DeliveryMethod,
    ) -> Result<String, DeliveryError>;
}

/// Time source for the verification lifecycle
///
/// The countdown display and the validity check on `submit` consult the
/// same clock, so they can never disagree about whether a code is live.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source used outside of tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
