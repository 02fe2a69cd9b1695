//! Storage abstractions owned by the core services.

pub mod keyed_store;

pub use keyed_store::KeyedStore;

#[cfg(test)]
pub use keyed_store::MockKeyedStore;
