//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint on failure
///
/// `error` carries the human-readable reason, `code` the stable identifier
/// clients branch on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message
    pub error: String,

    /// Error code for client identification
    pub code: String,

    /// Seconds until a rate-limited request may be retried
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,

    /// Verification attempts left for the pending code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
            retry_after: None,
            attempts_remaining: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a retry-after hint in seconds
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Attach the remaining attempt count
    pub fn with_attempts_remaining(mut self, attempts: u32) -> Self {
        self.attempts_remaining = Some(attempts);
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const PHONE_INVALID: &str = "PHONE_INVALID";
    pub const DESTINATION_UNDELIVERABLE: &str = "DESTINATION_UNDELIVERABLE";
    pub const VERIFICATION_CODE_NOT_FOUND: &str = "VERIFICATION_CODE_NOT_FOUND";
    pub const VERIFICATION_CODE_INVALID: &str = "VERIFICATION_CODE_INVALID";
    pub const VERIFICATION_CODE_EXPIRED: &str = "VERIFICATION_CODE_EXPIRED";
    pub const MAX_ATTEMPTS_EXCEEDED: &str = "MAX_ATTEMPTS_EXCEEDED";
}
