//! Configuration Module
//!
//! Cache construction parameters and their loading from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{CacheError, Result};

/// Default reclamation interval in seconds (five minutes).
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

// == Read Policy ==
/// How a lookup treats an entry that has outlived the interval but has not
/// been swept yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Report stale entries as misses
    #[default]
    RejectStale,
    /// Serve any stored entry until the reclamation pass removes it
    ServeUntilSwept,
}

impl FromStr for ReadPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ReadPolicy::RejectStale),
            "lazy" => Ok(ReadPolicy::ServeUntilSwept),
            other => Err(CacheError::InvalidConfiguration(format!(
                "unknown read policy '{}', expected 'strict' or 'lazy'",
                other
            ))),
        }
    }
}

// == Cache Config ==
/// Parameters fixed for the lifetime of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Reclamation period and staleness threshold
    pub interval: Duration,
    /// Lookup behavior for stale entries
    pub read_policy: ReadPolicy,
}

impl CacheConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            read_policy: ReadPolicy::default(),
        }
    }

    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    /// Rejects an interval that would make the reclamation loop degenerate,
    /// or one too large to schedule the first pass from now.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "interval must be a positive duration".to_string(),
            ));
        }
        if Instant::now().checked_add(self.interval).is_none() {
            return Err(CacheError::InvalidConfiguration(format!(
                "interval of {:?} is too large to schedule",
                self.interval
            )));
        }
        Ok(())
    }
}

// == Process Config ==
/// Process-level configuration for the `pokecache` binary.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reclamation interval in seconds
    pub interval_secs: u64,
    /// Lookup behavior for stale entries
    pub read_policy: ReadPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_SECS` - Reclamation interval in seconds (default: 300)
    /// - `CACHE_READ_POLICY` - `strict` or `lazy` (default: strict)
    ///
    /// Unparsable values fall back to the defaults. A zero interval is kept
    /// as-is and rejected when the cache is built.
    pub fn from_env() -> Self {
        Self {
            interval_secs: env::var("CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INTERVAL_SECS),
            read_policy: env::var("CACHE_READ_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(Duration::from_secs(self.interval_secs))
            .with_read_policy(self.read_policy)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            read_policy: ReadPolicy::default(),
        }
    }
}
