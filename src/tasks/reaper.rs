//! Expiry Reaper Task
//!
//! Background task that removes entries from the cache as their deadlines
//! pass and fires the corresponding `Expired` notifications.

use std::hash::Hash;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::CacheInner;
use crate::removal::{RemovalCause, RemovalNotification};

/// Spawns the reaper loop for one cache instance.
///
/// The loop blocks on the expiry queue for the next due element, removes
/// the matching pair from the table, and dispatches an `Expired`
/// notification. Removal is conditional on the stored value still equaling
/// the element's value, which guards against a replace or explicit removal
/// racing the reaper on the same key.
///
/// The task keeps the queue alive through its own `Arc` but only holds the
/// rest of the cache weakly, so dropping the last cache handle ends the
/// loop. `stop()` aborts the returned handle, which cancels the task at
/// its queue wait.
pub(crate) fn spawn_reaper_task<K, V>(inner: &Arc<CacheInner<K, V>>) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    let queue = Arc::clone(&inner.queue);
    let weak = Arc::downgrade(inner);
    let name = inner.config.name.clone();

    tokio::spawn(async move {
        debug!(cache = %name, "expiry reaper started");

        loop {
            let element = queue.take_earliest_when_due().await;

            let Some(inner) = weak.upgrade() else {
                break;
            };
            if !inner.running.load(Ordering::SeqCst) {
                break;
            }

            let entry = element.into_entry();
            let removed = inner
                .table
                .remove_if(&entry.key, |_, stored| *stored == entry.value)
                .is_some();

            if removed {
                inner.listeners.dispatch(RemovalNotification::new(
                    entry.key,
                    entry.value,
                    RemovalCause::Expired,
                ));
            }
        }

        debug!(cache = %name, "expiry reaper stopped");
    })
}
