//! Configuration for the verification service

use sg_shared::{SmsConfig, VerificationConfig};
use std::time::Duration as StdDuration;

use crate::domain::entities::verification_code::{DEFAULT_TTL_SECONDS, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Seconds before an issued code expires
    pub code_ttl_seconds: i64,
    /// Failed verifications tolerated per code
    pub max_attempts: u32,
    /// Whether the code is echoed back in the issuance result
    pub expose_code: bool,
    /// Upper bound on one sender call
    pub send_timeout: StdDuration,
    /// Pause before answering a simulated delivery
    pub demo_delay: StdDuration,
    /// Product name at the start of every message
    pub brand_name: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            expose_code: false,
            send_timeout: StdDuration::from_secs(10),
            demo_delay: StdDuration::from_secs(1),
            brand_name: String::from("SmsGate"),
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the loaded application configuration
    pub fn from_settings(verification: &VerificationConfig, sms: &SmsConfig) -> Self {
        Self {
            code_ttl_seconds: verification.code_ttl_seconds as i64,
            max_attempts: verification.max_attempts,
            expose_code: verification.expose_code,
            send_timeout: StdDuration::from_millis(sms.send_timeout_ms),
            demo_delay: StdDuration::from_millis(sms.demo_delay_ms),
            brand_name: sms.brand_name.clone(),
        }
    }

    /// Message delivered to the destination
    pub fn message_body(&self, code: &str) -> String {
        format!(
            "{} verification code: {}. Expires in {} minutes. If you didn't request this, ignore this message.",
            self.brand_name,
            code,
            (self.code_ttl_seconds / 60).max(1)
        )
    }
}
