//! Error types for code issuance, verification and input validation
//!
//! Display strings are the messages returned to clients, so they stay short
//! and never include the destination or the code.

use sg_shared::error_codes;
use thiserror::Error;

/// Verification lifecycle failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Too many SMS requests. Please try again later.")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("No verification code found")]
    NoVerificationCode,

    #[error("Verification code has expired")]
    VerificationCodeExpired,

    #[error("Too many failed attempts")]
    MaxAttemptsExceeded,

    #[error("Invalid verification code")]
    InvalidVerificationCode { attempts_remaining: u32 },

    /// The provider rejected the destination itself; retrying will not help
    #[error("{reason}")]
    UndeliverableDestination { reason: String },
}

impl AuthError {
    /// Stable identifier sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            AuthError::NoVerificationCode => error_codes::VERIFICATION_CODE_NOT_FOUND,
            AuthError::VerificationCodeExpired => error_codes::VERIFICATION_CODE_EXPIRED,
            AuthError::MaxAttemptsExceeded => error_codes::MAX_ATTEMPTS_EXCEEDED,
            AuthError::InvalidVerificationCode { .. } => error_codes::VERIFICATION_CODE_INVALID,
            AuthError::UndeliverableDestination { .. } => error_codes::DESTINATION_UNDELIVERABLE,
        }
    }
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    MissingField { message: String },

    #[error("Invalid phone number format. Please include country code.")]
    InvalidPhoneFormat,

    #[error("Invalid email address")]
    InvalidEmail,
}

impl ValidationError {
    pub fn missing(message: impl Into<String>) -> Self {
        ValidationError::MissingField {
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidPhoneFormat => error_codes::PHONE_INVALID,
            _ => error_codes::VALIDATION_ERROR,
        }
    }
}
