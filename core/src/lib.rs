//! # LabLend Core
//!
//! Core business logic and domain layer for the LabLend backend.
//! This crate owns the two-factor verification session lifecycle: code
//! generation, dispatch to a notification sink, countdown-based expiry,
//! attempt validation, and resend handling.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
