//! Cache Module
//!
//! Provides in-memory string caching with TTL expiration.

mod entry;
mod shared;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, Expiration};
pub use shared::Cache;
pub use store::CacheStore;
