//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::{CacheError, Result};

/// Environment variable holding the sweep interval in seconds.
pub const CLEANUP_INTERVAL_ENV: &str = "CACHE_CLEANUP_INTERVAL";

/// Default sweep interval in seconds.
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 1;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Background cleanup interval, `None` disables the sweeper
    pub cleanup_interval: Option<Duration>,
}

impl Config {
    /// Creates a Config with a background sweeper running at `interval`.
    pub fn with_cleanup_interval(interval: Duration) -> Self {
        Self {
            cleanup_interval: Some(interval),
        }
    }

    /// Creates a Config without background eviction.
    ///
    /// Expired entries are then only hidden at read time and reclaimed by
    /// explicit purges.
    pub fn without_cleanup() -> Self {
        Self {
            cleanup_interval: None,
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1,
    ///   `0` disables the sweeper)
    ///
    /// Unparsable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!("{}, falling back to defaults", err);
            Self::default()
        })
    }

    /// Strict variant of [`Config::from_env`] that rejects unparsable values.
    pub fn try_from_env() -> Result<Self> {
        match env::var(CLEANUP_INTERVAL_ENV) {
            Ok(raw) => Self::parse_interval(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_interval(raw: &str) -> Result<Self> {
        let secs: u64 = raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!(
                "{} must be a whole number of seconds, got {:?}",
                CLEANUP_INTERVAL_ENV, raw
            ))
        })?;

        Ok(match secs {
            0 => Self::without_cleanup(),
            secs => Self::with_cleanup_interval(Duration::from_secs(secs)),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_cleanup_interval(Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS))
    }
}
