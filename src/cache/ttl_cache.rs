//! TTL Cache Module
//!
//! The public cache handle: a mutex-guarded `CacheStore` shared with a
//! background reclamation task.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::{CacheConfig, ReadPolicy};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Shared State ==
/// State shared between the cache handle and its reclamation task.
#[derive(Debug)]
pub(crate) struct Shared {
    store: Mutex<CacheStore>,
    config: CacheConfig,
}

impl Shared {
    pub(crate) fn new(config: CacheConfig) -> Self {
        Self {
            store: Mutex::new(CacheStore::new()),
            config,
        }
    }

    /// Every critical section is a single store call, so a panic cannot
    /// leave the map half-updated; a poisoned lock is safe to keep using.
    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn interval(&self) -> Duration {
        self.config.interval
    }

    /// Runs one reclamation pass under a single lock acquisition.
    pub(crate) fn sweep(&self) -> usize {
        self.lock().sweep(self.config.interval)
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}

// == Cache ==
/// A time-bounded, thread-safe key/value cache for opaque byte payloads.
///
/// Entries older than the configured interval are removed by a background
/// task that wakes once per interval. The task stops when [`Cache::close`]
/// is called or the cache is dropped.
///
/// Construction needs a running Tokio runtime; `get` and `add` are plain
/// synchronous calls usable from any thread.
///
/// # Example
/// ```no_run
/// # async fn demo() -> pokecache::error::Result<()> {
/// use std::time::Duration;
/// use pokecache::Cache;
///
/// let cache = Cache::new(Duration::from_secs(300))?;
/// cache.add("https://pokeapi.co/api/v2/location-area", b"{}".to_vec());
/// assert!(cache.get("https://pokeapi.co/api/v2/location-area").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cache {
    shared: Arc<Shared>,
    shutdown: watch::Sender<bool>,
    reaper: JoinHandle<()>,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache that reclaims entries older than `interval`, using the
    /// default [`ReadPolicy`].
    ///
    /// # Errors
    /// - `InvalidConfiguration` if `interval` is zero or too large to schedule
    /// - `Runtime` if called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::new(interval))
    }

    /// Creates a cache from a full [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Handle::try_current().map_err(|e| CacheError::Runtime(e.to_string()))?;

        let shared = Arc::new(Shared::new(config));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(shared.clone(), shutdown_rx)?;

        Ok(Self {
            shared,
            shutdown,
            reaper,
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any existing entry and
    /// restarting its age.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let (key, value) = (key.into(), value.into());
        self.shared.lock().insert(key, value);
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`, or `None` if there is
    /// none (or it is stale and the read policy rejects stale entries).
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let config = &self.shared.config;
        self.shared
            .lock()
            .get(key, config.interval, config.read_policy)
    }

    // == Get Or Fetch ==
    /// Returns the cached payload for `key`, or awaits `fetch` on a miss and
    /// caches its successful result.
    ///
    /// The lock is not held while `fetch` runs, so two concurrent misses on
    /// the same key may both fetch; the later `add` wins. A failed fetch
    /// caches nothing and its error is returned unchanged.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<u8>, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        debug!(key, "Cache miss, fetching");
        let value = fetch().await?;
        self.add(key, value.clone());
        Ok(value)
    }

    // == Close ==
    /// Signals the reclamation task to stop. Safe to call more than once.
    ///
    /// Lookups and inserts keep working afterwards, but nothing is reclaimed
    /// any more.
    pub fn close(&self) {
        if self.shutdown.send_replace(true) {
            debug!("Cache already closed");
        } else {
            debug!("Cache closed, stopping reclamation task");
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    // == Shutdown ==
    /// Closes the cache and waits for the reclamation task to exit.
    pub async fn shutdown(self) {
        self.close();

        if let Err(e) = self.reaper.await {
            warn!("Reclamation task ended abnormally: {}", e);
        }
    }

    // == Introspection ==
    pub fn interval(&self) -> Duration {
        self.shared.config.interval
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.shared.config.read_policy
    }

    /// Number of stored entries, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.shared.stats()
    }
}
