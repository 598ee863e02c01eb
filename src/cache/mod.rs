//! Cache Module
//!
//! Provides an in-memory, time-bounded cache with background reclamation.

mod entry;
mod stats;
mod store;
mod ttl_cache;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use stats::CacheStats;
pub use ttl_cache::Cache;

pub(crate) use entry::CacheEntry;
pub(crate) use store::CacheStore;
pub(crate) use ttl_cache::Shared;
