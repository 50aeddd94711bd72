//! Cache Builder Module
//!
//! Fluent, set-once assembly of a cache configuration. Each field may be
//! set at most once; the frozen result is consumed by the cache at
//! construction and is immutable afterwards.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::Cache;
use crate::config::{CacheConfig, DEFAULT_EXPIRE_AFTER_WRITE, DEFAULT_MAXIMUM_SIZE};
use crate::error::{CacheError, Result};
use crate::removal::RemovalListener;

/// Initial table capacity a builder resolves to when none was set. The
/// cache's own default (used by `Cache::new`) is larger; see
/// [`DEFAULT_INITIAL_CAPACITY`](crate::config::DEFAULT_INITIAL_CAPACITY).
const BUILDER_INITIAL_CAPACITY: usize = 16;

// == Cache Builder ==
/// Builds a [`Cache`] from set-once configuration fields.
///
/// Setting a field a second time fails with [`CacheError::AlreadySet`];
/// zero capacities or durations fail with [`CacheError::InvalidArgument`].
/// Unset fields resolve to their defaults at [`build`](CacheBuilder::build).
///
/// ```
/// use std::time::Duration;
/// use lapse::CacheBuilder;
///
/// # fn main() -> lapse::Result<()> {
/// let cache: lapse::Cache<String, String> = CacheBuilder::new("sessions")
///     .maximum_size(500)?
///     .expire_after_write(Duration::from_secs(60))?
///     .build();
/// # Ok(())
/// # }
/// ```
pub struct CacheBuilder<K, V> {
    name: String,
    initial_capacity: Option<usize>,
    maximum_size: Option<usize>,
    expire_after_write: Option<Duration>,
    expire_after_access: Option<Duration>,
    removal_listeners: Vec<Arc<dyn RemovalListener<K, V>>>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    // == Constructor ==
    /// Starts a builder for a cache with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_capacity: None,
            maximum_size: None,
            expire_after_write: None,
            expire_after_access: None,
            removal_listeners: Vec::new(),
        }
    }

    // == Initial Capacity ==
    /// Sets the initial capacity of the key/value table.
    pub fn initial_capacity(mut self, capacity: usize) -> Result<Self> {
        if self.initial_capacity.is_some() {
            return Err(CacheError::AlreadySet {
                field: "initial_capacity",
            });
        }
        if capacity == 0 {
            return Err(CacheError::InvalidArgument {
                field: "initial_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.initial_capacity = Some(capacity);
        Ok(self)
    }

    // == Maximum Size ==
    /// Sets the entry count at which soonest-deadline eviction kicks in.
    pub fn maximum_size(mut self, size: usize) -> Result<Self> {
        if self.maximum_size.is_some() {
            return Err(CacheError::AlreadySet {
                field: "maximum_size",
            });
        }
        if size == 0 {
            return Err(CacheError::InvalidArgument {
                field: "maximum_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.maximum_size = Some(size);
        Ok(self)
    }

    // == Expire After Write ==
    /// Sets the time-to-live measured from the moment an entry is written
    /// or replaced.
    pub fn expire_after_write(mut self, duration: Duration) -> Result<Self> {
        if self.expire_after_write.is_some() {
            return Err(CacheError::AlreadySet {
                field: "expire_after_write",
            });
        }
        if duration.is_zero() {
            return Err(CacheError::InvalidArgument {
                field: "expire_after_write",
                reason: "duration must be non-zero".to_string(),
            });
        }
        self.expire_after_write = Some(duration);
        Ok(self)
    }

    // == Expire After Access ==
    /// Sets the time-to-live measured from an entry's last access. Reads
    /// through `get_if_present` (and hits in the loader path) push the
    /// deadline out by this duration.
    pub fn expire_after_access(mut self, duration: Duration) -> Result<Self> {
        if self.expire_after_access.is_some() {
            return Err(CacheError::AlreadySet {
                field: "expire_after_access",
            });
        }
        if duration.is_zero() {
            return Err(CacheError::InvalidArgument {
                field: "expire_after_access",
                reason: "duration must be non-zero".to_string(),
            });
        }
        self.expire_after_access = Some(duration);
        Ok(self)
    }

    // == Add Removal Listener ==
    /// Registers a removal listener on the cache being built. A listener
    /// already added (same `Arc`) is ignored.
    pub fn add_removal_listener(mut self, listener: Arc<dyn RemovalListener<K, V>>) -> Self {
        if self
            .removal_listeners
            .iter()
            .any(|l| Arc::ptr_eq(l, &listener))
        {
            debug!(cache = %self.name, "removal listener already added, ignoring");
            return self;
        }
        self.removal_listeners.push(listener);
        self
    }

    // == Build ==
    /// Freezes the configuration and constructs the cache. The cache is
    /// not started.
    pub fn build(self) -> Cache<K, V> {
        let config = CacheConfig {
            name: self.name,
            initial_capacity: self.initial_capacity.unwrap_or(BUILDER_INITIAL_CAPACITY),
            maximum_size: self.maximum_size.unwrap_or(DEFAULT_MAXIMUM_SIZE),
            expire_after_write: self.expire_after_write.unwrap_or(DEFAULT_EXPIRE_AFTER_WRITE),
            expire_after_access: self.expire_after_access,
        };
        Cache::with_config_and_listeners(config, self.removal_listeners)
    }
}
