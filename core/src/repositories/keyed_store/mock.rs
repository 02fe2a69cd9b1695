//! Mock implementation of KeyedStore for testing

use std::collections::HashMap;
use std::sync::Mutex;

use super::r#trait::KeyedStore;

/// Single-lock store; per-key atomicity holds trivially
pub struct MockKeyedStore<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V> MockKeyedStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> Default for MockKeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Send> KeyedStore<V> for MockKeyedStore<V> {
    fn with_entry<R, F>(&self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<V>) -> R,
    {
        let mut entries = self.entries.lock().unwrap();
        let mut slot = entries.remove(key);
        let result = f(&mut slot);
        if let Some(value) = slot {
            entries.insert(key.to_string(), value);
        }
        result
    }

    fn retain<F>(&self, mut keep: F) -> usize
    where
        F: FnMut(&str, &V) -> bool,
    {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, value| keep(key, value));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}
