//! Per-destination fixed-window rate limiting for code issuance
//!
//! Verification attempts are never rate limited; their budget is the
//! per-record attempt counter.

mod service;


pub use service::RateLimiter;
