//! Domain entities

pub mod verification_session;

pub use verification_session::{
    DeliveryMethod, SessionStatus, VerificationSession, CODE_LENGTH, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_TTL_SECONDS,
};
