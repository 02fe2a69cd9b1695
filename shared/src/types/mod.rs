//! Type definitions shared by the HTTP layer
//!
//! - `response` - health check response types

pub mod response;

pub use response::{HealthResponse, HealthStatus};
