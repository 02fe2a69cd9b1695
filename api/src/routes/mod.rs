//! HTTP route handlers

pub mod verification;

pub use verification::AppState;
