//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SmsGate server.
//! It provides concrete implementations for the abstractions defined in
//! `sg_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: sharded in-memory keyed store with per-key atomicity
//! - **SMS**: message senders (Twilio REST API, logging mock) and the sender factory
//! - **Services**: the background sweeper that prunes expired state
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS sender (default)

// Re-export core types for convenience
pub use sg_core::errors::*;

/// Cache module - In-memory keyed stores
pub mod cache;

/// SMS service module - External SMS providers
pub mod sms;

/// Services module - Infrastructure service implementations
pub mod services;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[cfg(feature = "twilio-sms")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
