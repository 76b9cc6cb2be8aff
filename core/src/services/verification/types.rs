//! Types for verification service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_session::SessionStatus;

/// Result of starting a verification flow or reissuing a code
#[derive(Debug, Clone)]
pub struct StartedVerification {
    /// Handle the caller uses for all subsequent operations
    pub session_id: Uuid,
    /// When the issued code stops validating
    pub expires_at: DateTime<Utc>,
    /// When the caller may request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Read-only view of a session for UI polling
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Lifecycle state with elapsed time folded in
    pub status: SessionStatus,
    /// Seconds until the live code expires, never negative
    pub remaining_seconds: i64,
    /// Guesses left against the live code
    pub attempts_remaining: u32,
}
