//! Eviction Sweep Task
//!
//! Background task that periodically removes cache entries older than the
//! TTL. The sweep is an explicitly owned task: whoever constructs the cache
//! spawns it, holds the `JoinHandle`, and aborts it on shutdown, so nothing
//! is tied to a wall-clock timer the tests cannot control.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::AnalysisCache;

/// Spawns the periodic eviction sweep for an analysis cache.
///
/// The task sleeps for the configured interval between sweeps and removes
/// every entry whose age exceeds the cache TTL. Lookups and inserts proceed
/// concurrently under the shared lock discipline.
///
/// # Arguments
/// * `cache` - Shared analysis cache to sweep
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during graceful shutdown.
pub fn spawn_sweep_task(cache: AnalysisCache, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting eviction sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.evict_expired_now().await;

            if removed > 0 {
                info!("Eviction sweep: removed {} expired entries", removed);
            } else {
                debug!("Eviction sweep: no expired entries found");
            }
        }
    })
}
