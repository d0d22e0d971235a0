//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Expiration ==
/// When an entry stops being visible to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// No TTL configured, the entry lives until removed
    Never,
    /// Unix timestamp in milliseconds at which the entry expires
    At(i64),
}

impl Expiration {
    // == From TTL ==
    /// Computes the expiration for a TTL measured from `now`.
    ///
    /// A missing or zero TTL means the entry never expires. The deadline is
    /// rounded up to the next millisecond, so an entry never expires before
    /// its full TTL has elapsed, even for sub-millisecond TTLs.
    pub fn from_ttl(ttl: Option<Duration>, now: DateTime<Utc>) -> Self {
        match ttl {
            Some(ttl) if !ttl.is_zero() => {
                let ttl_us = i64::try_from(ttl.as_nanos().div_ceil(1_000)).unwrap_or(i64::MAX);
                let deadline_ms = now
                    .timestamp_micros()
                    .checked_add(ttl_us)
                    .and_then(|us| us.checked_add(999))
                    .map_or(i64::MAX, |us| us.div_euclid(1_000));
                Expiration::At(deadline_ms)
            }
            _ => Expiration::Never,
        }
    }

    /// Returns true once `now_ms` has reached the expiration timestamp.
    pub fn has_passed(&self, now_ms: i64) -> bool {
        match self {
            Expiration::At(expires) => *expires <= now_ms,
            Expiration::Never => false,
        }
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiration marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration marker, `Expiration::Never` = no expiration
    pub expires_at: Expiration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL, `None` or zero means the entry never expires
    pub fn new(value: String, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: Expiration::from_ttl(ttl, Utc::now()),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired as soon as the current time
    /// is greater than or equal to its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`CacheEntry::is_expired`] against a caller-supplied clock
    /// reading, so a sweep compares every entry to the same instant.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at.has_passed(now_ms)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// An expired entry reports `Some(Duration::ZERO)`.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.ttl_remaining_at(current_timestamp_ms())
    }

    /// Same as [`CacheEntry::ttl_remaining`] against a caller-supplied clock
    /// reading.
    pub fn ttl_remaining_at(&self, now_ms: i64) -> Option<Duration> {
        match self.expires_at {
            Expiration::At(expires) => {
                let remaining = expires.saturating_sub(now_ms).max(0);
                Some(Duration::from_millis(remaining as u64))
            }
            Expiration::Never => None,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
