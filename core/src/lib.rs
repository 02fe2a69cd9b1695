//! # SmsGate Core
//!
//! Core business logic and domain layer for the SmsGate server.
//! This crate contains the verification record and rate limit entities,
//! the keyed store abstraction, the rate limiter, the code store and the
//! verification service that ties them to a message sender.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
