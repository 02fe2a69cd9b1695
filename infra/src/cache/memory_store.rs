//! Sharded in-memory keyed store
//!
//! Keys are spread over a fixed number of shards by hash; each shard is a
//! `HashMap` behind its own `parking_lot::Mutex`. Holding a shard lock gives
//! exclusive access to every key in it, which is what makes
//! [`KeyedStore::with_entry`] atomic per key while unrelated destinations
//! mostly land on different shards and proceed in parallel.

use parking_lot::Mutex;
use sg_core::repositories::KeyedStore;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Default number of shards
pub const DEFAULT_SHARDS: usize = 16;

/// Process-local keyed store using lock striping
pub struct InMemoryKeyedStore<V> {
    shards: Vec<Mutex<HashMap<String, V>>>,
}

impl<V> InMemoryKeyedStore<V> {
    /// Create a store with `shard_count` shards (at least one)
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, key: &str) -> &Mutex<HashMap<String, V>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    /// Drop every entry
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }
}

impl<V> Default for InMemoryKeyedStore<V> {
    fn default() -> Self {
        Self::new(DEFAULT_SHARDS)
    }
}

impl<V: Send> KeyedStore<V> for InMemoryKeyedStore<V> {
    fn with_entry<R, F>(&self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<V>) -> R,
    {
        let mut shard = self.shard_for(key).lock();
        let mut slot = shard.remove(key);
        let result = f(&mut slot);
        if let Some(value) = slot {
            shard.insert(key.to_string(), value);
        }
        result
    }

    fn retain<F>(&self, mut keep: F) -> usize
    where
        F: FnMut(&str, &V) -> bool,
    {
        self.shards
            .iter()
            .map(|shard| {
                let mut shard = shard.lock();
                let before = shard.len();
                shard.retain(|key, value| keep(key, value));
                before - shard.len()
            })
            .sum()
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }
}
