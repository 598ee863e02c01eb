//! Pokecache - A time-bounded, concurrency-safe in-memory cache
//!
//! Holds opaque byte payloads keyed by string (typically a request URL) and
//! reclaims entries older than a fixed interval from a background task.

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::{CacheConfig, Config, ReadPolicy};
pub use error::{CacheError, Result};
