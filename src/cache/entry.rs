//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached payload together with the instant it was stored.
///
/// Entries are never mutated in place: an overwrite replaces the whole entry,
/// value and timestamp alike.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, opaque to the cache
    pub value: Vec<u8>,
    /// Monotonic insertion time
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current monotonic time.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Returns how long ago the entry was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `interval`.
    ///
    /// Boundary condition: an entry whose age equals `interval` exactly is
    /// still fresh. Only strictly older entries are stale.
    pub fn is_stale(&self, interval: Duration) -> bool {
        self.age() > interval
    }
}
