//! Value objects representing immutable domain concepts.

pub mod destination;
pub mod outcome;

// Re-export commonly used types
pub use destination::Destination;
pub use outcome::{AdmitDecision, VerifyOutcome};
