//! Configuration types shared across server modules

mod environment;

pub use environment::Environment;
