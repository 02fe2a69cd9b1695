//! Domain entities representing core business objects.

pub mod rate_limit;
pub mod verification_code;

// Re-export commonly used types
pub use rate_limit::RateLimitRecord;
pub use verification_code::{VerificationRecord, CODE_LENGTH, DEFAULT_TTL_SECONDS, MAX_ATTEMPTS};
