//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The first sweep runs one `cleanup_interval` after spawning. Each sweep
/// takes the write lock on the store for a single full scan. The task ends
/// once `shutdown` is cancelled; cancelling more than once is harmless.
///
/// # Errors
/// - `CacheError::InvalidConfig` if `cleanup_interval` is zero or too large
///   to schedule
/// - `CacheError::NoRuntime` if called outside a tokio runtime
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new()));
/// let shutdown = CancellationToken::new();
/// let handle = spawn_cleanup_task(store.clone(), Duration::from_secs(1), shutdown.clone())?;
/// // Later:
/// shutdown.cancel();
/// handle.await?;
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval: Duration,
    shutdown: CancellationToken,
) -> Result<JoinHandle<()>> {
    if cleanup_interval.is_zero() {
        return Err(CacheError::InvalidConfig(
            "cleanup interval must be non-zero".to_string(),
        ));
    }
    let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
    let first_tick = Instant::now().checked_add(cleanup_interval).ok_or_else(|| {
        CacheError::InvalidConfig(format!("cleanup interval {:?} is too large", cleanup_interval))
    })?;

    Ok(runtime.spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {:?}",
            cleanup_interval
        );

        let mut ticker = interval_at(first_tick, cleanup_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }

        info!("TTL cleanup task stopped");
    }))
}
