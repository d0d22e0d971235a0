//! Cache Store Module
//!
//! Unsynchronized key-value storage with TTL expiration. `Cache` wraps it in
//! a lock for shared use; single-threaded callers can own one directly.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::CacheEntry;
use crate::error::Result;

// == Cache Store ==
/// Key-value storage with lazy TTL checks and explicit expiry sweeps.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// If the key already exists, the value is overwritten and the TTL is
    /// reset. The `Result` carries no failure today; callers should still
    /// propagate it.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL, `None` or zero means never expire
    pub fn set(&mut self, key: String, value: String, ttl: Option<Duration>) -> Result<()> {
        self.entries.insert(key, CacheEntry::new(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or logically expired. Expired
    /// entries are left in place for the next sweep.
    pub fn get(&self, key: &str) -> Option<String> {
        self.live_entry(key).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Returns true if the key holds a value that has not expired.
    pub fn contains_key(&self, key: &str) -> bool {
        self.live_entry(key).is_some()
    }

    // == TTL ==
    /// Returns the remaining lifetime of a live key.
    ///
    /// `None` when the key is absent, expired, or never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = current_timestamp_ms();
        self.live_entry_at(key, now)
            .and_then(|entry| entry.ttl_remaining_at(now))
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was removed. Deleting an absent key is a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Flush ==
    /// Replaces the whole mapping with an empty one.
    ///
    /// Returns the old mapping so the caller decides where it is freed.
    pub fn flush(&mut self) -> HashMap<String, CacheEntry> {
        std::mem::take(&mut self.entries)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Every entry is compared against a single clock reading. Returns the
    /// number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Returns the number of stored entries, including expired entries that
    /// have not been swept yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live_entry(&self, key: &str) -> Option<&CacheEntry> {
        self.live_entry_at(key, current_timestamp_ms())
    }

    fn live_entry_at(&self, key: &str, now_ms: i64) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|entry| !entry.is_expired_at(now_ms))
    }
}
