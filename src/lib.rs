//! Cosmocache - A small in-process key-value cache
//!
//! Stores string values under string keys with optional TTL expiration and
//! an optional background sweeper that evicts expired entries.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheEntry, CacheStore, Expiration};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
