//! Fixed-window rate limiter backed by a keyed store

use chrono::{DateTime, Duration, Utc};
use sg_shared::RateLimitConfig;
use std::sync::Arc;

use crate::domain::entities::RateLimitRecord;
use crate::domain::value_objects::{AdmitDecision, Destination};
use crate::repositories::KeyedStore;

/// Admits at most `max_requests` issuance requests per destination per window
pub struct RateLimiter<S: KeyedStore<RateLimitRecord>> {
    store: Arc<S>,
    window: Duration,
    max_requests: u32,
    eviction_horizon: Duration,
}

impl<S: KeyedStore<RateLimitRecord>> RateLimiter<S> {
    pub fn new(store: Arc<S>, config: &RateLimitConfig) -> Self {
        Self {
            store,
            window: Duration::seconds(config.window_seconds as i64),
            max_requests: config.max_requests,
            eviction_horizon: Duration::seconds(config.eviction_horizon_seconds() as i64),
        }
    }

    /// Admit or deny one request for `destination` at `now`
    ///
    /// The check and the counter update happen under the destination's lock,
    /// so concurrent callers can never push `count` past the maximum.
    pub fn admit(&self, destination: &Destination, now: DateTime<Utc>) -> AdmitDecision {
        let window = self.window;
        let max_requests = self.max_requests;

        self.store.with_entry(destination.as_str(), |slot| match slot {
            None => {
                *slot = Some(RateLimitRecord::start(now));
                AdmitDecision::Allowed
            }
            Some(record) => {
                let elapsed = now - record.window_start;
                if elapsed > window {
                    *record = RateLimitRecord::start(now);
                    AdmitDecision::Allowed
                } else if record.count >= max_requests {
                    AdmitDecision::Denied {
                        retry_after_seconds: retry_after_seconds(window - elapsed),
                    }
                } else {
                    record.count += 1;
                    AdmitDecision::Allowed
                }
            }
        })
    }

    /// Drop records whose window started more than the eviction horizon ago
    ///
    /// Such records would be reset by the next `admit` anyway, so removing
    /// them never changes an admit/deny decision.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let horizon = self.eviction_horizon.max(self.window);
        self.store
            .retain(|_, record| now - record.window_start <= horizon)
    }

    /// Number of destinations currently tracked
    pub fn tracked(&self) -> usize {
        self.store.len()
    }
}

// Whole seconds, rounded up, never zero so clients always back off.
fn retry_after_seconds(remaining: Duration) -> u64 {
    let millis = remaining.num_milliseconds().max(0) as u64;
    millis.div_ceil(1000).max(1)
}
