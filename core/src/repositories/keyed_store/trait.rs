//! Keyed store trait defining per-key atomic access to in-process state.

/// Map from destination to a single value with per-key atomicity
///
/// Every read-modify-write of one key happens inside [`KeyedStore::with_entry`],
/// which must run the closure while holding exclusive access to that key.
/// Calls for different keys may proceed in parallel. There is no ordering
/// guarantee across keys.
///
/// # Contract
/// - the closure sees `Some(value)` when the key is present
/// - leaving `None` in the slot removes the key
/// - leaving `Some(value)` inserts or replaces it
/// - the closure must not call back into the same store
pub trait KeyedStore<V>: Send + Sync {
    /// Run `f` on the slot for `key` under that key's lock
    ///
    /// # Example
    /// ```
    /// # use sg_core::repositories::KeyedStore;
    /// fn bump<S: KeyedStore<u32>>(store: &S, key: &str) -> u32 {
    ///     store.with_entry(key, |slot| {
    ///         let next = slot.map_or(1, |count| count + 1);
    ///         *slot = Some(next);
    ///         next
    ///     })
    /// }
    /// ```
    fn with_entry<R, F>(&self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<V>) -> R;

    /// Keep only entries for which `keep` returns true
    ///
    /// Each entry is examined under its key's lock. Returns the number of
    /// removed entries.
    fn retain<F>(&self, keep: F) -> usize
    where
        F: FnMut(&str, &V) -> bool;

    /// Number of stored entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone of the current value, if any
    fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.with_entry(key, |slot| slot.clone())
    }
}
