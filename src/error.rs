//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Missing keys are not errors: lookups return `None` and deletes of absent
/// keys are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value rejected (zero interval, unparsable env var)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A background sweeper was requested outside a tokio runtime
    #[error("No tokio runtime available to run the cleanup task")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
