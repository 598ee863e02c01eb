//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reclamation: removes entries older than the cache interval, once per interval

mod reaper;

pub(crate) use reaper::spawn_reaper;
