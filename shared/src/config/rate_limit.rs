//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Per-destination rate limiting for code issuance
///
/// A destination may request at most `max_requests` codes inside a fixed
/// window of `window_seconds`. Records whose window started more than
/// `eviction_multiplier` windows ago are removed by the background sweeper.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Fixed window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Max issuance requests per destination per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Stale records are evicted after this many window lengths
    #[serde(default = "default_eviction_multiplier")]
    pub eviction_multiplier: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            max_requests: default_max_requests(),
            eviction_multiplier: default_eviction_multiplier(),
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_seconds: env_parse("RATE_LIMIT_WINDOW_SECONDS", defaults.window_seconds).max(1),
            max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests).max(1),
            eviction_multiplier: env_parse(
                "RATE_LIMIT_EVICTION_MULTIPLIER",
                defaults.eviction_multiplier,
            )
            .max(1),
        }
    }

    /// Age in seconds after which a rate-limit window is considered stale
    pub fn eviction_horizon_seconds(&self) -> u64 {
        self.window_seconds
            .saturating_mul(u64::from(self.eviction_multiplier))
    }
}

fn default_window_seconds() -> u64 {
    60 // 1 minute
}

fn default_max_requests() -> u32 {
    3
}

fn default_eviction_multiplier() -> u32 {
    10
}
