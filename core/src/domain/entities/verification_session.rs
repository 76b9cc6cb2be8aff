//! Verification session entity for two-factor code entry.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::VerificationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for an issued code (login flow)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Default number of guesses allowed per issued code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Channel a verification code is dispatched over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Sms,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Sms => "sms",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a verification session
///
/// `AwaitingDelivery → AwaitingInput → {Verified | Expired}`, with failed
/// attempts looping on `AwaitingInput` and a reissue returning from
/// `AwaitingInput`, `Expired`, or `AwaitingDelivery` with a fresh code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Session exists but no code has been issued (or the pending code was
    /// invalidated by a delivery-method change)
    AwaitingDelivery,
    /// A code is live and the caller may submit guesses until expiry
    AwaitingInput,
    /// The caller proved receipt of the code; the session is concluded
    Verified,
    /// The code's validity window elapsed; only a reissue recovers
    Expired,
}

/// Verification session entity
///
/// Owns the lifecycle of a single 6-digit code. All time-dependent
/// operations take `now` explicitly so the same clock drives both the
/// countdown display and the validity checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    /// Unique identifier, used as the caller-facing session handle
    pub id: Uuid,

    /// Email address or E.164 phone number; immutable for the session lifetime
    pub contact: String,

    /// Channel the next code will be dispatched over
    pub method: DeliveryMethod,

    /// The live 6-digit code, if one has been issued
    code: Option<String>,

    /// Number of guesses made against the live code
    pub attempts: u32,

    /// Timestamp when the live code was (re)generated
    pub issued_at: Option<DateTime<Utc>>,

    /// Timestamp when the live code stops validating
    pub expires_at: Option<DateTime<Utc>>,

    /// Lifecycle state
    pub status: SessionStatus,
}

impl VerificationSession {
    /// Creates a new session in `AwaitingDelivery` with no code issued
    pub fn new(contact: String, method: DeliveryMethod) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact,
            method,
            code: None,
            attempts: 0,
            issued_at: None,
            expires_at: None,
            status: SessionStatus::AwaitingDelivery,
        }
    }

    /// Generates a random 6-digit code over the full `000000`–`999999` space
    ///
    /// Leading zeros are preserved by formatting into a fixed-width string.
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Issues a fresh code, replacing any previous one
    ///
    /// The old code stops validating the moment this method returns; the
    /// attempt counter and validity window are reset. Valid from every state
    /// except `Verified`.
    ///
    /// # Arguments
    ///
    /// * `now` - Current instant from the caller's clock
    /// * `ttl_seconds` - Validity window for the new code
    ///
    /// # Returns
    ///
    /// The newly issued code, for handoff to the notification sink
    pub fn issue_code(
        &mut self,
        now: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Result<String, VerificationError> {
        if self.status == SessionStatus::Verified {
            return Err(VerificationError::AlreadyVerified);
        }

        let code = Self::generate_code();
        self.code = Some(code.clone());
        self.attempts = 0;
        self.issued_at = Some(now);
        self.expires_at = Some(now + Duration::seconds(ttl_seconds));
        self.status = SessionStatus::AwaitingInput;
        Ok(code)
    }

    /// Validates a submitted candidate against the live code
    ///
    /// Check order is load-bearing: malformed input is rejected before any
    /// state is touched, and the expiry check precedes the equality check so
    /// a correct-but-stale code can never verify.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The digits the caller entered
    /// * `now` - Current instant from the caller's clock
    /// * `max_attempts` - Cap on guesses per issued code
    pub fn submit(
        &mut self,
        candidate: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<(), VerificationError> {
        if candidate.len() != CODE_LENGTH || !candidate.chars().all(|c| c.is_ascii_digit()) {
            return Err(VerificationError::InvalidCodeFormat);
        }

        match self.status {
            SessionStatus::Verified => return Err(VerificationError::AlreadyVerified),
            SessionStatus::AwaitingDelivery => return Err(VerificationError::CodeNotIssued),
            SessionStatus::Expired => return Err(VerificationError::CodeExpired),
            SessionStatus::AwaitingInput => {}
        }

        let expires_at = self.expires_at.ok_or(VerificationError::CodeNotIssued)?;
        if now >= expires_at {
            self.status = SessionStatus::Expired;
            return Err(VerificationError::CodeExpired);
        }

        if self.attempts >= max_attempts {
            return Err(VerificationError::AttemptsExhausted);
        }
        self.attempts += 1;

        let code = self.code.as_deref().ok_or(VerificationError::CodeNotIssued)?;
        if constant_time_eq(code.as_bytes(), candidate.as_bytes()) {
            self.status = SessionStatus::Verified;
            Ok(())
        } else {
            Err(VerificationError::IncorrectCode {
                attempts_remaining: max_attempts.saturating_sub(self.attempts),
            })
        }
    }

    /// Switches the delivery channel, invalidating any pending code
    ///
    /// The session returns to `AwaitingDelivery`; a reissue is required
    /// before the caller can submit again. Switching to the current channel
    /// is a no-op.
    pub fn change_method(&mut self, method: DeliveryMethod) -> Result<(), VerificationError> {
        if self.status == SessionStatus::Verified {
            return Err(VerificationError::AlreadyVerified);
        }
        if self.method == method {
            return Ok(());
        }

        self.method = method;
        self.code = None;
        self.attempts = 0;
        self.issued_at = None;
        self.expires_at = None;
        self.status = SessionStatus::AwaitingDelivery;
        Ok(())
    }

    /// Seconds until the live code expires, never negative
    ///
    /// Computed on demand from `expires_at`; 0 when no code is issued or the
    /// window has elapsed.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.expires_at {
            Some(expires_at) if expires_at > now => (expires_at - now).num_seconds(),
            _ => 0,
        }
    }

    /// Checks whether the live code's validity window has elapsed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    /// Folds elapsed time into the stored status and returns it
    ///
    /// An `AwaitingInput` session whose deadline has passed becomes
    /// `Expired` here; `expires_at` remains the single authority.
    pub fn refresh_status(&mut self, now: DateTime<Utc>) -> SessionStatus {
        if self.status == SessionStatus::AwaitingInput && self.is_expired(now) {
            self.status = SessionStatus::Expired;
        }
        self.status
    }

    /// Guesses left against the live code (0 if exhausted)
    pub fn attempts_remaining(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// The live code, for assertions inside the service layer's tests
    #[cfg(test)]
    pub(crate) fn current_code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}
