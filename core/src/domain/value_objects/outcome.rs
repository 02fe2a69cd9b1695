//! Results of the rate limiter and of code verification.

use serde::Serialize;

use crate::errors::{AuthError, DomainResult};

/// Rate limiter verdict for one issuance request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitDecision {
    Allowed,
    Denied { retry_after_seconds: u64 },
}

impl AdmitDecision {
    #[cfg(test)]
    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmitDecision::Allowed)
    }
}

/// Result of checking a supplied code against the pending record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Code matched; the record has been consumed
    Verified,
    /// Nothing pending for the destination
    NoCode,
    /// Record was past its expiry and has been deleted
    Expired,
    /// Attempt budget was already spent; the record has been deleted
    AttemptsExhausted,
    /// Code did not match; the failure was counted
    Mismatch { attempts_remaining: u32 },
}

impl VerifyOutcome {
    /// Every outcome except `Verified` becomes the matching `AuthError`
    pub fn into_result(self) -> DomainResult<()> {
        let error = match self {
            VerifyOutcome::Verified => return Ok(()),
            VerifyOutcome::NoCode => AuthError::NoVerificationCode,
            VerifyOutcome::Expired => AuthError::VerificationCodeExpired,
            VerifyOutcome::AttemptsExhausted => AuthError::MaxAttemptsExceeded,
            VerifyOutcome::Mismatch { attempts_remaining } => {
                AuthError::InvalidVerificationCode { attempts_remaining }
            }
        };
        Err(error.into())
    }
}
