//! Reclamation Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::Shared;
use crate::error::{CacheError, Result};

/// Spawns the reclamation task for one cache.
///
/// The first pass runs one full interval after this call, then once per
/// interval. Each pass takes the cache lock once and removes every entry
/// older than the interval.
///
/// The task exits when `shutdown` turns `true` or its sender is dropped.
/// Shutdown is checked before the tick, so no pass starts after the signal
/// has been observed.
///
/// Must be called from within a Tokio runtime. Fails with
/// `InvalidConfiguration` if the first pass cannot be scheduled.
pub(crate) fn spawn_reaper(
    shared: Arc<Shared>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<JoinHandle<()>> {
    let period = shared.interval();
    let start = Instant::now().checked_add(period).ok_or_else(|| {
        CacheError::InvalidConfiguration(format!(
            "interval of {:?} is too large to schedule",
            period
        ))
    })?;
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    Ok(tokio::spawn(async move {
        info!("Starting reclamation task with interval of {:?}", period);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.wait_for(|closed| *closed) => break,
                _ = ticker.tick() => {
                    let removed = shared.sweep();

                    if removed > 0 {
                        info!("Reclamation: removed {} expired entries", removed);
                    } else {
                        debug!("Reclamation: no expired entries found");
                    }
                }
            }
        }

        info!("Reclamation task stopped");
    }))
}
