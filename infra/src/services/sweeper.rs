//! Background sweeper for expired verification state
//!
//! Periodically removes verification records that are already past their
//! expiry and rate limit windows older than the eviction horizon. Both are
//! states a read would discard anyway, so sweeping never changes an outcome.

use sg_core::services::verification::{SweepReport, Sweepable};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Configuration for the sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl SweeperConfig {
    /// An interval of zero disables the sweeper
    pub fn from_interval(interval_seconds: u64) -> Self {
        Self {
            interval_seconds,
            enabled: interval_seconds > 0,
        }
    }
}

/// Periodic sweeper over a [`Sweepable`] target
pub struct StateSweeper {
    target: Arc<dyn Sweepable>,
    config: SweeperConfig,
}

impl StateSweeper {
    pub fn new(target: Arc<dyn Sweepable>, config: SweeperConfig) -> Self {
        Self { target, config }
    }

    /// Run a single sweep cycle
    pub fn run_once(&self) -> SweepReport {
        let report = self.target.sweep();
        if report.total() > 0 {
            info!(
                expired_codes = report.expired_codes_removed,
                rate_limits = report.rate_limits_evicted,
                event = "state_swept",
                "Removed expired verification state"
            );
        } else {
            debug!("Sweep found nothing to remove");
        }
        report
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled. The first tick fires
    /// immediately.
    pub fn start_background_task(self) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("State sweeper is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "State sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_once();
            }
        }))
    }
}
