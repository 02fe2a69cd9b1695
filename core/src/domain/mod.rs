//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{RateLimitRecord, VerificationRecord, CODE_LENGTH, MAX_ATTEMPTS};
pub use value_objects::{AdmitDecision, Destination, VerifyOutcome};
