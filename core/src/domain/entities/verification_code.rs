//! Pending verification code held for a single destination.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts tolerated
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Verification record stored per destination
///
/// At most one record exists per destination; issuing a new code replaces
/// the previous record and resets `attempts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Canonical destination the code was issued for
    pub destination: String,

    /// The zero-padded 6-digit code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is rejected
    pub expires_at: DateTime<Utc>,

    /// Failed verification attempts so far
    pub attempts: u32,
}

impl VerificationRecord {
    /// Issue a fresh record with a random code
    pub fn issue(destination: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(destination, Self::generate_code(), now, ttl)
    }

    /// Build a record around a known code
    pub fn with_code(
        destination: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            destination: destination.into(),
            code: code.into(),
            issued_at: now,
            expires_at: now + ttl,
            attempts: 0,
        }
    }

    /// Generates a code uniformly over 000000..=999999 from the OS CSPRNG
    pub fn generate_code() -> String {
        Self::format_code(OsRng.gen_range(0..1_000_000))
    }

    /// Zero-pads a numeric code to `CODE_LENGTH` digits
    pub fn format_code(value: u32) -> String {
        format!("{:0width$}", value, width = CODE_LENGTH)
    }

    /// Expired strictly after `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn attempts_remaining(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_expiry_and_resets_attempts() {
        let now = Utc::now();
        let record = VerificationRecord::issue("+61412345678", now, Duration::seconds(300));

        assert_eq!(record.destination, "+61412345678");
        assert_eq!(record.code.len(), CODE_LENGTH);
        assert!(record.code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(record.attempts, 0);
        assert_eq!(record.expires_at - record.issued_at, Duration::seconds(300));
    }

    #[test]
    fn test_format_code_preserves_leading_zeros() {
        assert_eq!(VerificationRecord::format_code(42), "000042");
        assert_eq!(VerificationRecord::format_code(0), "000000");
        assert_eq!(VerificationRecord::format_code(999_999), "999999");
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| VerificationRecord::generate_code()).collect();
        assert!(codes.len() > 1);
        assert!(codes.iter().all(|c| c.len() == CODE_LENGTH));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let record = VerificationRecord::with_code("+14155552671", "123456", now, Duration::seconds(60));

        assert!(!record.is_expired(now));
        assert!(!record.is_expired(record.expires_at));
        assert!(record.is_expired(record.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_attempts_remaining_saturates() {
        let mut record = VerificationRecord::with_code("+14155552671", "123456", Utc::now(), Duration::seconds(60));
        record.attempts = 5;
        assert_eq!(record.attempts_remaining(MAX_ATTEMPTS), 0);
    }
}
