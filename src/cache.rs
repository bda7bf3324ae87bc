//! Per-session memoization of lookup results.

use ahash::AHashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::LookupResult;

/// A cache slot: created empty, filled exactly once.
#[derive(Debug, Default)]
pub struct CacheEntry {
    result: OnceCell<LookupResult>,
}

impl CacheEntry {
    /// The stored result, if the lookup has completed.
    pub fn get(&self) -> Option<&LookupResult> {
        self.result.get()
    }

    /// Return the stored result, running `lookup` if the slot is still empty.
    ///
    /// Concurrent callers on the same slot wait for the first one.
    pub fn get_or_init<F>(&self, lookup: F) -> &LookupResult
    where
        F: FnOnce() -> LookupResult,
    {
        self.result.get_or_init(lookup)
    }
}

/// Keyed result cache with insert-if-absent semantics.
///
/// Keys are normalized address strings. Results are idempotent, so the cache
/// only saves work; removing a key makes the next query look it up again.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: Mutex<AHashMap<String, Arc<CacheEntry>>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `key`, creating an empty placeholder if absent.
    ///
    /// The flag is `true` when the placeholder was created by this call.
    pub fn get_or_create(&self, key: &str) -> (Arc<CacheEntry>, bool) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(key) {
            return (Arc::clone(entry), false);
        }
        let entry = Arc::new(CacheEntry::default());
        entries.insert(key.to_string(), Arc::clone(&entry));
        (entry, true)
    }

    /// Completed result for `key`, if any.
    pub fn get(&self, key: &str) -> Option<LookupResult> {
        self.entries
            .lock()
            .get(key)
            .and_then(|entry| entry.get().cloned())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Drop the entry for `key`. Returns whether one existed.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    /// Drop `entry` if it is still the one stored under `key`.
    pub fn discard(&self, key: &str, entry: &Arc<CacheEntry>) -> bool {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(current) if Arc::ptr_eq(current, entry) => {
                entries.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
