//! Cache Store Module
//!
//! The unsynchronized entry map. Callers wrap it in a lock; every method
//! here runs inside one critical section and does no I/O.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};
use crate::config::ReadPolicy;

// == Cache Store ==
/// Key-value storage with time-based reclamation.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores a payload under `key`, replacing any previous entry and its
    /// timestamp.
    pub fn insert(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Looks up `key`.
    ///
    /// Under [`ReadPolicy::RejectStale`] an entry older than `interval` is
    /// reported as a miss but left in place for the next sweep.
    pub fn get(&mut self, key: &str, interval: Duration, policy: ReadPolicy) -> Option<Vec<u8>> {
        let value = match self.entries.get(key) {
            Some(entry) if policy == ReadPolicy::RejectStale && entry.is_stale(interval) => None,
            Some(entry) => Some(entry.value.clone()),
            None => None,
        };

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Sweep ==
    /// Removes every entry older than `interval`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, interval: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(interval));
        let removed = before - self.entries.len();

        self.stats.record_sweep(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
