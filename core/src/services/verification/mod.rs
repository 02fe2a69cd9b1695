//! Verification service module for SMS one-time codes
//!
//! This module provides the verification code workflow:
//! - Per-destination rate limiting of issuance
//! - Code generation, storage and replacement
//! - Delivery through a pluggable message sender with demo fallback
//! - Verification with attempt tracking and lazy expiry

mod code_store;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use code_store::CodeStore;
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{MessageSender, SendError, SendReceipt, Sweepable};
pub use types::{DeliveryMethod, IssueCodeResult, SweepReport};
