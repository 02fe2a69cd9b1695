//! Cache module for process-local state
//!
//! Verification records and rate limit windows live only in memory; a restart
//! discards them.

pub mod memory_store;


pub use memory_store::{InMemoryKeyedStore, DEFAULT_SHARDS};
