//! Sweep Task
//!
//! Background task that periodically drops expired and invalidated entries.
//! Lookups already hide dead entries; the sweep reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheManager, MemoryStore};

/// Spawns a background task that periodically purges dead cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// (at least one second) between sweeps.
///
/// # Arguments
/// * `cache` - Shared reference to the cache manager
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheManager::new(CacheSettings::default()));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<S>(cache: Arc<CacheManager<S>>, cleanup_interval_secs: u64) -> JoinHandle<()>
where
    S: MemoryStore + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} dead entries", removed);
            } else {
                debug!("Cache sweep: no dead entries found");
            }
        }
    })
}
