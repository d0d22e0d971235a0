//! Shared Cache Module
//!
//! Thread-safe cache handle: a `CacheStore` behind a single reader/writer
//! lock, plus an optional background sweeper mutating it under the same lock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;

// == Cache ==
/// Thread-safe string cache with optional TTL and background eviction.
///
/// Reads take the shared lock, writes the exclusive one. tokio's `RwLock`
/// queues waiters fairly, so readers and writers cannot starve each other.
/// Expiration is checked on every read, so an expired value is never
/// returned no matter when the sweeper last ran.
///
/// Share a `Cache` across tasks by wrapping it in an `Arc`. Dropping it stops
/// the sweeper.
#[derive(Debug)]
pub struct Cache {
    /// Lock-guarded storage, shared with the sweeper
    store: Arc<RwLock<CacheStore>>,
    /// Cancels the sweeper, `None` when constructed without one
    sweeper: Option<CancellationToken>,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache without background eviction.
    ///
    /// Expired entries are hidden from reads and reclaimed only through
    /// [`Cache::purge_expired`], overwrites, deletes, or flushes.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
            sweeper: None,
        }
    }

    /// Creates a cache whose expired entries are swept every
    /// `cleanup_interval` on the current tokio runtime.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if the interval is zero
    /// - `CacheError::NoRuntime` if called outside a tokio runtime
    pub fn with_cleanup_interval(cleanup_interval: Duration) -> Result<Self> {
        let store = Arc::new(RwLock::new(CacheStore::new()));
        let shutdown = CancellationToken::new();

        // Detached: the task ends on its own once the token is cancelled
        let _handle = spawn_cleanup_task(store.clone(), cleanup_interval, shutdown.clone())?;
        debug!("Cache created with sweeper every {:?}", cleanup_interval);

        Ok(Self {
            store,
            sweeper: Some(shutdown),
        })
    }

    /// Creates a cache from configuration, with a sweeper iff one is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.cleanup_interval {
            Some(interval) => Self::with_cleanup_interval(interval),
            None => Ok(Self::new()),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// `ttl` of `None` or zero means the entry never expires. No failure is
    /// defined today, but the `Result` should still be checked.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let (key, value) = (key.into(), value.into());
        self.store.write().await.set(key, value, ttl)
    }

    // == Get ==
    /// Returns the value for `key`, or `None` if absent or expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.store.read().await.get(key)
    }

    // == Del ==
    /// Removes `key` if present. Returns whether anything was removed;
    /// deleting an absent key is not an error.
    pub async fn del(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Flush ==
    /// Drops every entry in one step. Concurrent readers observe either the
    /// full mapping or the empty one, never a partial state.
    pub async fn flush(&self) {
        let old_entries = {
            let mut store = self.store.write().await;
            store.flush()
        };
        // Freed outside the write lock
        debug!("Flushed {} entries", old_entries.len());
        drop(old_entries);
    }

    // == Stop ==
    /// Stops the background sweeper.
    ///
    /// Idempotent, and a no-op for caches built without a sweeper. All other
    /// operations keep working afterwards; expired entries are then only
    /// hidden at read time.
    pub fn stop(&self) {
        if let Some(shutdown) = &self.sweeper {
            if !shutdown.is_cancelled() {
                debug!("Stopping cache sweeper");
                shutdown.cancel();
            }
        }
    }

    /// Returns true while a sweeper is configured and not stopped.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .as_ref()
            .is_some_and(|shutdown| !shutdown.is_cancelled())
    }

    // == Extras ==
    /// Returns the remaining lifetime of `key`.
    ///
    /// `None` when the key is absent, expired, or never expires.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        self.store.read().await.ttl_remaining(key)
    }

    /// Returns true if `key` holds a value that has not expired.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }

    /// Runs one sweep pass immediately. Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        if let Some(shutdown) = &self.sweeper {
            shutdown.cancel();
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[tokio::test]
    async fn test_cache_new_is_empty() {
        let cache = Cache::new();

        assert!(cache.is_empty().await);
        assert_eq!(cache.get("key1").await, None);
        assert!(!cache.is_sweeping());
    }

    #[tokio::test]
    async fn test_cache_set_get_del() {
        let cache = Cache::new();

        cache.set("key1", "value1", None).await.unwrap();
        assert_eq!(cache.get("key1").await.as_deref(), Some("value1"));
        assert!(cache.contains("key1").await);

        assert!(cache.del("key1").await);
        assert_eq!(cache.get("key1").await, None);
        assert!(!cache.del("key1").await);
    }

    #[tokio::test]
    async fn test_cache_flush() {
        let cache = Cache::new();

        for i in 0..25 {
            cache.set(format!("key{}", i), "value", None).await.unwrap();
        }
        cache.flush().await;

        assert_eq!(cache.len().await, 0);
        assert_eq!(cache.get("key7").await, None);
        assert!(cache.store.try_write().is_ok(), "write lock released after flush");
    }

    #[tokio::test]
    async fn test_cache_lazy_expiry_without_sweeper() {
        let cache = Cache::new();

        cache
            .set("key1", "value1", Some(Duration::from_millis(150)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(cache.get("key1").await, None);
        assert_eq!(cache.len().await, 1, "No sweeper, entry stays stored");

        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_ttl() {
        let cache = Cache::new();

        cache
            .set("key1", "value1", Some(Duration::from_secs(30)))
            .await
            .unwrap();
        cache.set("key2", "value2", None).await.unwrap();

        assert!(cache.ttl("key1").await.unwrap() > Duration::from_secs(29));
        assert_eq!(cache.ttl("key2").await, None);
        assert_eq!(cache.ttl("missing").await, None);
    }

    #[tokio::test]
    async fn test_cache_stop_is_idempotent() {
        let cache = Cache::with_cleanup_interval(Duration::from_millis(50)).unwrap();
        assert!(cache.is_sweeping());

        cache.stop();
        cache.stop();
        assert!(!cache.is_sweeping());

        cache.set("key1", "value1", None).await.unwrap();
        assert_eq!(cache.get("key1").await.as_deref(), Some("value1"));
    }

    #[tokio::test]
    async fn test_cache_stop_without_sweeper() {
        let cache = Cache::new();
        cache.stop();
        assert!(!cache.is_sweeping());
    }

    #[tokio::test]
    async fn test_cache_rejects_zero_interval() {
        let result = Cache::with_cleanup_interval(Duration::ZERO);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_cache_sweeper_requires_runtime() {
        let result = Cache::with_cleanup_interval(Duration::from_secs(1));
        assert!(matches!(result, Err(CacheError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_cache_from_config() {
        let cache = Cache::from_config(&Config::without_cleanup()).unwrap();
        assert!(!cache.is_sweeping());

        let cache =
            Cache::from_config(&Config::with_cleanup_interval(Duration::from_secs(5))).unwrap();
        assert!(cache.is_sweeping());
    }
}
