//! HTTP layer of the SmsGate server
//!
//! Exposed as a library so integration tests can build the same `App`
//! the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{build_default_state, build_state, create_app, InMemoryAppState};
