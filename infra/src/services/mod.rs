//! Infrastructure service implementations

pub mod sweeper;

pub use sweeper::{StateSweeper, SweeperConfig};
