//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations and configuration.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Operation attempted before `start()` or after `stop()`
    #[error("cache '{0}' is not running")]
    NotRunning(String),

    /// A set-once builder field was set a second time
    #[error("builder field `{field}` was already set")]
    AlreadySet {
        /// Name of the offending builder field
        field: &'static str,
    },

    /// A configuration value outside the accepted range
    #[error("invalid value for `{field}`: {reason}")]
    InvalidArgument {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The value loader failed to produce a value
    #[error("value loader failed")]
    Load(#[source] anyhow::Error),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
