//! Main verification service implementation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use ll_shared::utils::contact::{is_valid_email, is_valid_phone, mask_contact};

use crate::domain::entities::verification_session::{
    DeliveryMethod, SessionStatus, VerificationSession,
};
use crate::errors::{DomainError, DomainResult, VerificationError};

use super::config::VerificationServiceConfig;
use super::countdown::Countdown;
use super::traits::{Clock, NotificationSink, SystemClock};
use super::types::{SessionSnapshot, StartedVerification};

/// Verification service for two-factor code entry
///
/// Owns one `VerificationSession` per in-flight verification attempt, keyed
/// by the handle returned from [`start`](Self::start). Sessions live only in
/// memory for the duration of one attempt; `cancel` (or process exit)
/// discards them.
pub struct VerificationService<S: NotificationSink> {
    /// Notification sink codes are dispatched to
    sink: Arc<S>,
    /// Time source shared by countdown display and validity checks
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
    /// In-flight sessions, keyed by handle
    sessions: Mutex<HashMap<Uuid, VerificationSession>>,
}

impl<S: NotificationSink + 'static> VerificationService<S> {
    /// Create a new verification service backed by the wall clock
    pub fn new(sink: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self::with_clock(sink, config, Arc::new(SystemClock))
    }

    /// Create a verification service with an explicit time source
    ///
    /// # Arguments
    ///
    /// * `sink` - Notification sink implementation
    /// * `config` - Service configuration
    /// * `clock` - Time source (a virtual clock in tests)
    pub fn with_clock(
        sink: Arc<S>,
        config: VerificationServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sink,
            clock,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a verification flow for a contact address
    ///
    /// This method:
    /// 1. Validates the contact for the chosen delivery method
    /// 2. Creates a session and issues a fresh 6-digit code
    /// 3. Dispatches the code to the notification sink asynchronously
    ///
    /// Dispatch is fire-and-forget: a sink failure is logged but never
    /// blocks the session from accepting input.
    ///
    /// # Arguments
    ///
    /// * `contact` - Email address or E.164 phone number
    /// * `method` - Channel to dispatch the code over
    ///
    /// # Returns
    ///
    /// * `Ok(StartedVerification)` - Session handle plus expiry/resend times
    /// * `Err(DomainError)` - If the contact is invalid for the method
    pub async fn start(
        &self,
        contact: &str,
        method: DeliveryMethod,
    ) -> DomainResult<StartedVerification> {
        self.validate_contact(contact, method)?;

        let now = self.clock.now();
        let mut session = VerificationSession::new(contact.to_string(), method);
        let code = session.issue_code(now, self.config.ttl_seconds)?;
        let session_id = session.id;

        tracing::info!(
            session_id = %session_id,
            contact = %mask_contact(contact),
            method = %method,
            event = "code_issued",
            "Issued verification code"
        );

        self.sessions.lock().await.insert(session_id, session);
        self.dispatch(session_id, contact.to_string(), code, method);

        Ok(StartedVerification {
            session_id,
            expires_at: now + Duration::seconds(self.config.ttl_seconds),
            next_resend_at: now + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Validate a submitted code against a session's live code
    ///
    /// Failure reasons map onto [`VerificationError`]: malformed input (no
    /// state change), expired code (time check precedes the equality check),
    /// exhausted attempt cap, or a plain mismatch. A session that already
    /// verified rejects further submissions.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Handle returned from `start`
    /// * `candidate` - The digits the caller entered
    pub async fn submit(&self, session_id: Uuid, candidate: &str) -> DomainResult<()> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = Self::session_mut(&mut sessions, session_id)?;

        match session.submit(candidate, now, self.config.max_attempts) {
            Ok(()) => {
                tracing::info!(
                    session_id = %session_id,
                    event = "verification_succeeded",
                    "Verification code accepted"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %err,
                    event = "verification_failed",
                    "Verification attempt rejected"
                );
                Err(DomainError::Verification(err))
            }
        }
    }

    /// Reissue the session's code and reset the countdown
    ///
    /// The old code is invalidated atomically with the generation of the new
    /// one (both happen under the session-table lock), so an in-flight
    /// submit racing this call can only ever see one authoritative code.
    /// Subject to the configured resend cooldown.
    pub async fn resend(&self, session_id: Uuid) -> DomainResult<StartedVerification> {
        let now = self.clock.now();
        let (contact, code, method) = {
            let mut sessions = self.sessions.lock().await;
            let session = Self::session_mut(&mut sessions, session_id)?;

            if session.status == SessionStatus::Verified {
                return Err(DomainError::Verification(VerificationError::AlreadyVerified));
            }

            if let Some(issued_at) = session.issued_at {
                let elapsed = (now - issued_at).num_seconds();
                if elapsed < self.config.resend_cooldown_seconds {
                    let wait = self.config.resend_cooldown_seconds - elapsed;
                    tracing::warn!(
                        session_id = %session_id,
                        wait_seconds = wait,
                        event = "resend_throttled",
                        "Resend requested inside the cooldown window"
                    );
                    return Err(DomainError::Verification(VerificationError::ResendCooldown {
                        seconds: wait,
                    }));
                }
            }

            let code = session.issue_code(now, self.config.ttl_seconds)?;
            (session.contact.clone(), code, session.method)
        };

        tracing::info!(
            session_id = %session_id,
            contact = %mask_contact(&contact),
            method = %method,
            event = "code_reissued",
            "Reissued verification code"
        );
        self.dispatch(session_id, contact, code, method);

        Ok(StartedVerification {
            session_id,
            expires_at: now + Duration::seconds(self.config.ttl_seconds),
            next_resend_at: now + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Seconds until the session's code expires, never negative
    ///
    /// Computed from `expires_at` and the service clock on demand, so any
    /// display driven from here agrees with the validity check in `submit`.
    pub async fn remaining_seconds(&self, session_id: Uuid) -> DomainResult<i64> {
        let now = self.clock.now();
        let sessions = self.sessions.lock().await;
        let session = sessions
            .get(&session_id)
            .ok_or_else(|| Self::not_found(session_id))?;
        Ok(session.remaining_seconds(now))
    }

    /// Read-only view of a session for UI polling
    ///
    /// Folds elapsed time into the status, so a session whose deadline has
    /// passed reads as `Expired` even if no submit has observed that yet.
    pub async fn snapshot(&self, session_id: Uuid) -> DomainResult<SessionSnapshot> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        let session = Self::session_mut(&mut sessions, session_id)?;

        Ok(SessionSnapshot {
            status: session.refresh_status(now),
            remaining_seconds: session.remaining_seconds(now),
            attempts_remaining: session.attempts_remaining(self.config.max_attempts),
        })
    }

    /// Switch the session's delivery channel
    ///
    /// Invalidates any pending code; the caller must `resend` to receive a
    /// code over the new channel.
    pub async fn change_delivery_method(
        &self,
        session_id: Uuid,
        method: DeliveryMethod,
    ) -> DomainResult<()> {
        let mut sessions = self.sessions.lock().await;
        let session = Self::session_mut(&mut sessions, session_id)?;
        session.change_method(method)?;

        tracing::info!(
            session_id = %session_id,
            method = %method,
            event = "delivery_method_changed",
            "Delivery method changed; pending code invalidated"
        );
        Ok(())
    }

    /// Discard a session from any state
    ///
    /// Idempotent: cancelling an unknown or already-cancelled handle is a
    /// no-op.
    pub async fn cancel(&self, session_id: Uuid) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(&session_id).is_some() {
            tracing::debug!(
                session_id = %session_id,
                event = "session_cancelled",
                "Verification session discarded"
            );
        }
    }

    /// Spawn a once-per-second countdown publisher for a session
    ///
    /// The ticker is display plumbing only; dropping or cancelling it never
    /// affects the session. It reads the same clock the service validates
    /// with.
    pub async fn countdown(&self, session_id: Uuid) -> DomainResult<Countdown> {
        let sessions = self.sessions.lock().await;
        let session = sessions
            .get(&session_id)
            .ok_or_else(|| Self::not_found(session_id))?;
        let expires_at = session
            .expires_at
            .ok_or(DomainError::Verification(VerificationError::CodeNotIssued))?;

        Ok(Countdown::start(expires_at, Arc::clone(&self.clock)))
    }

    fn validate_contact(&self, contact: &str, method: DeliveryMethod) -> DomainResult<()> {
        let valid = match method {
            DeliveryMethod::Email => is_valid_email(contact),
            DeliveryMethod::Sms => is_valid_phone(contact),
        };
        if valid {
            Ok(())
        } else {
            Err(DomainError::Validation {
                message: format!(
                    "Invalid {} contact: {}",
                    method,
                    mask_contact(contact)
                ),
            })
        }
    }

    /// Hand the code to the sink without coupling the state machine to the
    /// outcome; failures go to the log only.
    fn dispatch(&self, session_id: Uuid, contact: String, code: String, method: DeliveryMethod) {
        let sink = Arc::clone(&self.sink);
        let masked = mask_contact(&contact);
        tokio::spawn(async move {
            match sink.send(&contact, &code, method).await {
                Ok(message_id) => {
                    tracing::debug!(
                        session_id = %session_id,
                        contact = %masked,
                        message_id = %message_id,
                        event = "code_dispatched",
                        "Verification code dispatched"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        session_id = %session_id,
                        contact = %masked,
                        error = %err,
                        event = "delivery_failed",
                        "Verification code delivery failed; session remains open"
                    );
                }
            }
        });
    }

    fn session_mut(
        sessions: &mut HashMap<Uuid, VerificationSession>,
        session_id: Uuid,
    ) -> DomainResult<&mut VerificationSession> {
        sessions
            .get_mut(&session_id)
            .ok_or_else(|| Self::not_found(session_id))
    }

    fn not_found(session_id: Uuid) -> DomainError {
        DomainError::NotFound {
            resource: format!("verification session {}", session_id),
        }
    }

    /// Test hook: the session's live code, bypassing the sink
    #[cfg(test)]
    pub(crate) async fn issued_code(&self, session_id: Uuid) -> Option<String> {
        self.sessions
            .lock()
            .await
            .get(&session_id)
            .and_then(|s| s.current_code().map(str::to_string))
    }
}
