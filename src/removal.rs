//! Removal Notification Module
//!
//! Typed removal causes, the notification passed to listeners, and the
//! listener registry with snapshot-then-dispatch delivery.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::error;

// == Removal Cause ==
/// The reason an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    /// The caller removed the entry via `remove` or `remove_all`
    Explicit,
    /// The caller overwrote the entry's key with a new value
    Replaced,
    /// The entry's expiration deadline passed and the reaper collected it
    Expired,
    /// The entry was evicted to keep the cache under its maximum size
    Size,
}

impl RemovalCause {
    /// Returns `true` if the removal was automatic (expiry or size
    /// eviction) rather than caller-initiated.
    pub fn was_evicted(&self) -> bool {
        matches!(self, RemovalCause::Expired | RemovalCause::Size)
    }
}

// == Removal Notification ==
/// A notification describing one removed entry, passed by value to every
/// registered listener.
#[derive(Debug, Clone)]
pub struct RemovalNotification<K, V> {
    /// Key of the removed entry
    pub key: K,
    /// Value of the removed entry
    pub value: V,
    /// Why the entry was removed
    pub cause: RemovalCause,
}

impl<K, V> RemovalNotification<K, V> {
    /// Creates a notification for a removed (key, value) pair.
    pub fn new(key: K, value: V, cause: RemovalCause) -> Self {
        Self { key, value, cause }
    }
}

// == Removal Listener Trait ==
/// A callback invoked each time an entry is removed from the cache,
/// whatever the cause.
///
/// Listeners run synchronously on the task that performed the removal (the
/// reaper task for expirations). Do not call back into the cache from a
/// listener: the mutating operations share one write lock and re-entering
/// them would deadlock.
pub trait RemovalListener<K, V>: Send + Sync {
    /// Called once per removed entry.
    fn on_removal(&self, notification: RemovalNotification<K, V>);
}

impl<K, V, F> RemovalListener<K, V> for F
where
    F: Fn(RemovalNotification<K, V>) + Send + Sync,
{
    fn on_removal(&self, notification: RemovalNotification<K, V>) {
        self(notification)
    }
}

// == Listener Set ==
/// Registered listeners for one cache instance.
///
/// The list has its own lock, independent of the cache's write lock, so
/// registration never contends with cache mutations. Dispatch snapshots
/// the list and invokes listeners in registration order without holding
/// the lock.
pub(crate) struct ListenerSet<K, V> {
    listeners: Mutex<Vec<Arc<dyn RemovalListener<K, V>>>>,
}

impl<K: Clone, V: Clone> ListenerSet<K, V> {
    pub(crate) fn new(initial: Vec<Arc<dyn RemovalListener<K, V>>>) -> Self {
        Self {
            listeners: Mutex::new(initial),
        }
    }

    // == Add ==
    /// Registers a listener. A listener already registered (same `Arc`)
    /// is ignored; returns whether the listener was added.
    pub(crate) fn add(&self, listener: Arc<dyn RemovalListener<K, V>>) -> bool {
        let mut listeners = self.listeners.lock();
        if listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    // == Remove ==
    /// Deregisters a listener by `Arc` identity; returns whether it was
    /// present.
    pub(crate) fn remove(&self, listener: &Arc<dyn RemovalListener<K, V>>) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        listeners.len() < before
    }

    // == Dispatch ==
    /// Delivers one notification to every registered listener, in
    /// registration order.
    ///
    /// A panicking listener is caught and logged so that later listeners
    /// still run and the reaper loop stays alive.
    pub(crate) fn dispatch(&self, notification: RemovalNotification<K, V>) {
        let snapshot = {
            let listeners = self.listeners.lock();
            if listeners.is_empty() {
                return;
            }
            listeners.clone()
        };

        for listener in snapshot {
            let result = catch_unwind(AssertUnwindSafe(|| {
                listener.on_removal(notification.clone());
            }));
            if result.is_err() {
                error!(cause = ?notification.cause, "removal listener panicked during dispatch");
            }
        }
    }

    // == Dispatch All ==
    /// Delivers a batch of notifications in order. Used by mutations that
    /// collect notifications under the write lock and deliver them after
    /// releasing it.
    pub(crate) fn dispatch_all(&self, notifications: Vec<RemovalNotification<K, V>>) {
        for notification in notifications {
            self.dispatch(notification);
        }
    }
}
