//! Shared utilities and common types for the LabLend server
//!
//! This crate provides common functionality used across all server modules:
//! - Contact (email/phone) validation and masking
//! - Error response structures
//! - Environment configuration

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::Environment;
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::contact;
