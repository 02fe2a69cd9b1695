//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How the code reached (or would have reached) the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Accepted by a real provider
    RealSms,
    /// Simulated; no provider configured or provider unavailable
    DemoMode,
}

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueCodeResult {
    pub method: DeliveryMethod,
    /// Canonical destination the code was stored under
    pub destination: String,
    /// The code itself, only when exposure is enabled
    pub code: Option<String>,
    /// Provider message reference on real delivery
    pub provider_reference: Option<String>,
    /// Provider status on real delivery
    pub provider_status: Option<String>,
    /// Human-readable summary
    pub message: String,
    /// Message body that would have been sent, only in demo mode with exposure enabled
    pub demo_message: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Counts from one sweep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired_codes_removed: usize,
    pub rate_limits_evicted: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.expired_codes_removed + self.rate_limits_evicted
    }
}
