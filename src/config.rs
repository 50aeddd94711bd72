//! Configuration Module
//!
//! The frozen configuration value a cache consumes once at construction.

use std::time::Duration;

// == Default Constants ==
/// Default maximum number of entries the cache can hold
pub const DEFAULT_MAXIMUM_SIZE: usize = 10_000;

/// Default time-to-live measured from write
pub const DEFAULT_EXPIRE_AFTER_WRITE: Duration = Duration::from_secs(300);

/// Default initial capacity of the key/value table
pub const DEFAULT_INITIAL_CAPACITY: usize = 100;

// == Cache Config ==
/// Immutable configuration for a single cache instance.
///
/// Built either directly (`CacheConfig::new` with the defaults above) or by
/// [`CacheBuilder`](crate::CacheBuilder). The cache reads it once at
/// construction; it cannot be changed afterwards.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache name, used in log output and error messages
    pub name: String,
    /// Initial capacity of the key/value table
    pub initial_capacity: usize,
    /// Maximum number of entries before soonest-deadline eviction kicks in
    pub maximum_size: usize,
    /// Time-to-live measured from the moment an entry is written
    pub expire_after_write: Duration,
    /// Time-to-live measured from the last access, None = disabled
    pub expire_after_access: Option<Duration>,
}

impl CacheConfig {
    /// Creates a configuration with the given name and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            maximum_size: DEFAULT_MAXIMUM_SIZE,
            expire_after_write: DEFAULT_EXPIRE_AFTER_WRITE,
            expire_after_access: None,
        }
    }
}
