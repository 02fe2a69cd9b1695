//! Fixed-window request counter for a single destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issuance requests admitted in the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRecord {
    /// Admitted requests since `window_start`
    pub count: u32,

    /// Start of the current window
    pub window_start: DateTime<Utc>,
}

impl RateLimitRecord {
    /// Open a new window with one admitted request
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }
}
