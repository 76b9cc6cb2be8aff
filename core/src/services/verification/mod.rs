//! Verification service module for two-factor code entry
//!
//! This module provides the complete verification code workflow:
//! - Code generation and asynchronous dispatch to a notification sink
//! - Attempt validation with a configurable cap
//! - Countdown-based expiry driven by an injectable clock
//! - Resend with cooldown and atomic invalidation of the old code

mod config;
mod countdown;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use countdown::Countdown;
pub use service::VerificationService;
pub use traits::{Clock, NotificationSink, SystemClock};
pub use types::{SessionSnapshot, StartedVerification};
