//! Cache Store Module
//!
//! The public cache handle: a concurrent key/value table plus the
//! orchestration (get/put/remove/eviction/replacement) that keeps the
//! table and the expiry queue consistent.

use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::entry::CacheEntry;
use crate::cache::queue::ExpiryQueue;
use crate::cache::EVICTION_BATCH;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::removal::{ListenerSet, RemovalCause, RemovalListener, RemovalNotification};
use crate::tasks::spawn_reaper_task;

// == Cache Inner ==
/// State shared between cache handles and the reaper task.
pub(crate) struct CacheInner<K, V> {
    /// Frozen configuration, consumed at construction
    pub(crate) config: CacheConfig,
    /// Key/value table; reads are lock-free
    pub(crate) table: DashMap<K, V>,
    /// Deadline-ordered expiry schedule, one element per live key
    pub(crate) queue: Arc<ExpiryQueue<K, V>>,
    /// Registered removal listeners
    pub(crate) listeners: ListenerSet<K, V>,
    /// Flipped by start()/stop(); every operation checks it first
    pub(crate) running: AtomicBool,
    /// Serializes the compound table+queue mutation sequences
    write_lock: AsyncMutex<()>,
    /// Handle of the spawned reaper, aborted on stop
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> Drop for CacheInner<K, V> {
    fn drop(&mut self) {
        // The reaper only holds a weak reference back to this state, so
        // dropping the last handle must also stop the task.
        if let Some(handle) = self.reaper.lock().take() {
            handle.abort();
        }
    }
}

// == Cache ==
/// A local, in-process key/value cache with TTL expiration,
/// soonest-deadline size eviction, and removal notifications.
///
/// `Cache` is a cheap handle over shared state; clone it freely to share
/// one instance across tasks. A cache must be [`start`](Cache::start)ed
/// before use and every operation on a stopped cache fails with
/// [`CacheError::NotRunning`].
pub struct Cache<K, V> {
    inner: Arc<CacheInner<K, V>>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache with the given name and default configuration.
    ///
    /// The cache is constructed stopped; call [`start`](Cache::start)
    /// before using it.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(CacheConfig::new(name))
    }

    /// Creates a cache from a frozen configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_config_and_listeners(config, Vec::new())
    }

    /// Used by the builder to hand over pre-registered listeners.
    pub(crate) fn with_config_and_listeners(
        config: CacheConfig,
        listeners: Vec<Arc<dyn RemovalListener<K, V>>>,
    ) -> Self {
        let table = DashMap::with_capacity(config.initial_capacity);
        Self {
            inner: Arc::new(CacheInner {
                config,
                table,
                queue: Arc::new(ExpiryQueue::new()),
                listeners: ListenerSet::new(listeners),
                running: AtomicBool::new(false),
                write_lock: AsyncMutex::new(()),
                reaper: Mutex::new(None),
            }),
        }
    }

    // == Lifecycle ==
    /// Starts the cache: spawns the reaper task and accepts operations.
    /// Idempotent. Must be called from within a tokio runtime.
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let handle = spawn_reaper_task(&self.inner);
        *self.inner.reaper.lock() = Some(handle);
        info!(cache = %self.inner.config.name, "cache started");
    }

    /// Stops the cache: drops all entries, stops the reaper, and makes
    /// every subsequent operation fail with `NotRunning`. Idempotent.
    /// A stopped cache may be started again.
    pub fn stop(&self) {
        if !self.inner.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.inner.queue.clear();
        self.inner.table.clear();
        if let Some(handle) = self.inner.reaper.lock().take() {
            handle.abort();
        }
        info!(cache = %self.inner.config.name, "cache stopped");
    }

    /// Alias for [`stop`](Cache::stop).
    pub fn shutdown(&self) {
        self.stop();
    }

    /// Whether the cache is currently accepting operations.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// The cache's configured name.
    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    fn check_running(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(CacheError::NotRunning(self.inner.config.name.clone()))
        }
    }

    // == Get If Present ==
    /// Returns the value for `key` if one is cached, without running any
    /// loader.
    ///
    /// The table lookup is lock-free and not linearized against writers.
    /// If `expire_after_access` is configured, a hit reschedules the
    /// entry's deadline to `now + expire_after_access`, making this a
    /// side-effecting read. The reschedule skips the write lock, so it can race a
    /// concurrent put/remove/reap of the same key; the table/queue pairing
    /// is guaranteed between completed operations, not mid-flight.
    pub fn get_if_present(&self, key: &K) -> Result<Option<V>> {
        self.check_running()?;
        let value = self.inner.table.get(key).map(|v| v.value().clone());
        if let Some(ref value) = value {
            if let Some(tti) = self.inner.config.expire_after_access {
                self.reschedule_access(key, value, tti);
            }
        }
        Ok(value)
    }

    // == Get With Loader ==
    /// Returns the cached value for `key`, running `loader` to produce and
    /// cache it on a miss. The loaded value expires after the configured
    /// write TTL.
    pub async fn get_with<F, Fut>(&self, key: K, loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        let ttl = self.inner.config.expire_after_write;
        self.get_with_ttl(key, ttl, loader).await
    }

    /// Like [`get_with`](Cache::get_with) with an explicit TTL for the
    /// loaded value. A zero `ttl` resolves to the configured write TTL.
    ///
    /// The whole hit-check/load/store sequence runs under the cache's
    /// single write lock, so at most one loader is in flight per cache
    /// instance: concurrent callers for the same absent key all observe
    /// the one loaded value. A failed loader surfaces as
    /// [`CacheError::Load`] and leaves no partial entry behind.
    pub async fn get_with_ttl<F, Fut>(&self, key: K, ttl: Duration, loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        self.check_running()?;
        let ttl = self.effective_ttl(ttl);
        let guard = self.inner.write_lock.lock().await;

        if let Some(value) = self.inner.table.get(&key).map(|v| v.value().clone()) {
            if let Some(tti) = self.inner.config.expire_after_access {
                self.reschedule_access(&key, &value, tti);
            }
            return Ok(value);
        }

        let value = loader().await.map_err(CacheError::Load)?;

        let mut pending = Vec::new();
        self.evict_if_at_capacity(&mut pending);
        self.insert_scheduled(key, value.clone(), ttl, &mut pending);
        drop(guard);
        self.inner.listeners.dispatch_all(pending);
        Ok(value)
    }

    // == Put ==
    /// Stores `value` under `key` with the configured write TTL,
    /// replacing any previous value.
    pub async fn put(&self, key: K, value: V) -> Result<()> {
        let ttl = self.inner.config.expire_after_write;
        self.put_with_ttl(key, value, ttl).await
    }

    /// Stores `value` under `key`, expiring after `ttl`. A zero `ttl`
    /// resolves to the configured write TTL.
    ///
    /// If the key was already present, the previous entry's schedule is
    /// dropped and a `Replaced` notification is dispatched once the write
    /// lock is released.
    pub async fn put_with_ttl(&self, key: K, value: V, ttl: Duration) -> Result<()> {
        self.check_running()?;
        let ttl = self.effective_ttl(ttl);
        let pending = {
            let _guard = self.inner.write_lock.lock().await;
            let mut pending = Vec::new();
            self.evict_if_at_capacity(&mut pending);
            self.insert_scheduled(key, value, ttl, &mut pending);
            pending
        };
        self.inner.listeners.dispatch_all(pending);
        Ok(())
    }

    // == Put If Absent ==
    /// Returns the existing value untouched if `key` is present;
    /// otherwise stores `value` with the configured write TTL and returns
    /// `None`.
    pub async fn put_if_absent(&self, key: K, value: V) -> Result<Option<V>> {
        self.check_running()?;
        let ttl = self.inner.config.expire_after_write;
        let pending = {
            let _guard = self.inner.write_lock.lock().await;
            if let Some(existing) = self.inner.table.get(&key).map(|v| v.value().clone()) {
                return Ok(Some(existing));
            }
            let mut pending = Vec::new();
            self.evict_if_at_capacity(&mut pending);
            self.insert_scheduled(key, value, ttl, &mut pending);
            pending
        };
        self.inner.listeners.dispatch_all(pending);
        Ok(None)
    }

    // == Remove ==
    /// Removes the entry for `key`, dispatching an `Explicit`
    /// notification if it was present. Absent keys are a no-op.
    pub async fn remove(&self, key: &K) -> Result<()> {
        self.check_running()?;
        let pending = {
            let _guard = self.inner.write_lock.lock().await;
            let mut pending = Vec::new();
            if self.inner.table.remove(key).is_some() {
                if let Some(element) = self.inner.queue.remove_first_matching(|e| &e.key == key) {
                    let entry = element.into_entry();
                    pending.push(RemovalNotification::new(
                        entry.key,
                        entry.value,
                        RemovalCause::Explicit,
                    ));
                }
            }
            pending
        };
        self.inner.listeners.dispatch_all(pending);
        Ok(())
    }

    /// Removes every listed key, dispatching `Explicit` per removed
    /// entry. Absent keys are skipped; an empty slice is a no-op.
    pub async fn remove_all(&self, keys: &[K]) -> Result<()> {
        self.check_running()?;
        if keys.is_empty() {
            return Ok(());
        }
        let pending: Vec<_> = {
            let _guard = self.inner.write_lock.lock().await;
            let removed = self.inner.queue.remove_matching(|e| keys.contains(&e.key));
            for key in keys {
                self.inner.table.remove(key);
            }
            removed
                .into_iter()
                .map(|element| {
                    let entry = element.into_entry();
                    RemovalNotification::new(entry.key, entry.value, RemovalCause::Explicit)
                })
                .collect()
        };
        self.inner.listeners.dispatch_all(pending);
        Ok(())
    }

    // == Clear ==
    /// Drops every entry, atomically with respect to other mutating
    /// operations. Fires no per-entry notifications.
    pub async fn clear(&self) -> Result<()> {
        self.check_running()?;
        let _guard = self.inner.write_lock.lock().await;
        self.inner.table.clear();
        self.inner.queue.clear();
        Ok(())
    }

    // == Size ==
    /// Number of live entries (the queue length, which tracks the table
    /// one-to-one between operations).
    pub fn size(&self) -> Result<usize> {
        self.check_running()?;
        Ok(self.inner.queue.len())
    }

    // == Listeners ==
    /// Registers a removal listener. Listeners already registered (same
    /// `Arc`) are ignored.
    pub fn add_removal_listener(&self, listener: Arc<dyn RemovalListener<K, V>>) {
        if !self.inner.listeners.add(listener) {
            debug!(cache = %self.inner.config.name, "removal listener already registered");
        }
    }

    /// Deregisters a listener previously passed to
    /// [`add_removal_listener`](Cache::add_removal_listener).
    pub fn remove_removal_listener(&self, listener: &Arc<dyn RemovalListener<K, V>>) {
        self.inner.listeners.remove(listener);
    }

    // == Internals ==
    fn effective_ttl(&self, ttl: Duration) -> Duration {
        if ttl.is_zero() {
            self.inner.config.expire_after_write
        } else {
            ttl
        }
    }

    /// Moves the key's queue element to a fresh access deadline. Runs
    /// outside the write lock (see `get_if_present`); fires nothing,
    /// since the entry never leaves the cache.
    fn reschedule_access(&self, key: &K, value: &V, tti: Duration) {
        self.inner.queue.remove_first_matching(|e| &e.key == key);
        self.inner
            .queue
            .insert(CacheEntry::new(key.clone(), value.clone()), Instant::now() + tti);
    }

    /// Stores the pair and schedules its expiry. If a previous value
    /// existed, its queue element is dropped and a `Replaced`
    /// notification queued. Caller holds the write lock.
    fn insert_scheduled(
        &self,
        key: K,
        value: V,
        ttl: Duration,
        pending: &mut Vec<RemovalNotification<K, V>>,
    ) {
        let previous = self.inner.table.insert(key.clone(), value.clone());
        if previous.is_some() {
            if let Some(element) = self.inner.queue.remove_first_matching(|e| e.key == key) {
                let entry = element.into_entry();
                pending.push(RemovalNotification::new(
                    entry.key,
                    entry.value,
                    RemovalCause::Replaced,
                ));
            }
        }
        self.inner
            .queue
            .insert(CacheEntry::new(key, value), Instant::now() + ttl);
    }

    /// When the cache is at capacity, drops a batch of the
    /// soonest-deadline entries (deadline order, not recency order) to
    /// make room, queueing a `Size` notification per victim. Caller holds
    /// the write lock.
    fn evict_if_at_capacity(&self, pending: &mut Vec<RemovalNotification<K, V>>) {
        if self.inner.queue.len() < self.inner.config.maximum_size {
            return;
        }
        let victims = self.inner.queue.pop_earliest_batch(EVICTION_BATCH);
        debug!(
            cache = %self.inner.config.name,
            evicted = victims.len(),
            "size eviction"
        );
        for element in victims {
            let entry = element.into_entry();
            self.inner.table.remove(&entry.key);
            pending.push(RemovalNotification::new(
                entry.key,
                entry.value,
                RemovalCause::Size,
            ));
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    type Recorded = Arc<Mutex<Vec<RemovalNotification<String, String>>>>;

    fn recording_listener() -> (Arc<dyn RemovalListener<String, String>>, Recorded) {
        let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = recorded.clone();
        let listener: Arc<dyn RemovalListener<String, String>> =
            Arc::new(move |n: RemovalNotification<String, String>| {
                sink.lock().push(n);
            });
        (listener, recorded)
    }

    fn started_cache(name: &str) -> Cache<String, String> {
        let cache = Cache::new(name);
        cache.start();
        cache
    }

    fn assert_table_queue_agree(cache: &Cache<String, String>) {
        assert_eq!(cache.inner.table.len(), cache.inner.queue.len());
        for entry in cache.inner.table.iter() {
            let key = entry.key().clone();
            assert_eq!(
                cache.inner.queue.count_matching(|e| e.key == key),
                1,
                "key not scheduled exactly once: {key}"
            );
        }
    }

    #[tokio::test]
    async fn test_operations_require_start() {
        let cache: Cache<String, String> = Cache::new("lifecycle");

        assert!(matches!(
            cache.get_if_present(&"k".to_string()),
            Err(CacheError::NotRunning(_))
        ));
        assert!(matches!(
            cache.put("k".to_string(), "v".to_string()).await,
            Err(CacheError::NotRunning(_))
        ));
        assert!(matches!(cache.size(), Err(CacheError::NotRunning(_))));
    }

    #[tokio::test]
    async fn test_put_and_get_roundtrip() {
        let cache = started_cache("roundtrip");

        cache.put("k".to_string(), "v".to_string()).await.unwrap();

        assert_eq!(
            cache.get_if_present(&"k".to_string()).unwrap(),
            Some("v".to_string())
        );
        assert_eq!(cache.size().unwrap(), 1);
        assert_table_queue_agree(&cache);
        cache.stop();
    }

    #[tokio::test]
    async fn test_get_if_present_missing_key() {
        let cache = started_cache("missing");
        assert_eq!(cache.get_if_present(&"nope".to_string()).unwrap(), None);
        cache.stop();
    }

    #[tokio::test]
    async fn test_overwrite_fires_replaced_with_old_value() {
        let cache = started_cache("replace");
        let (listener, recorded) = recording_listener();
        cache.add_removal_listener(listener);

        cache.put("k".to_string(), "old".to_string()).await.unwrap();
        cache.put("k".to_string(), "new".to_string()).await.unwrap();

        assert_eq!(
            cache.get_if_present(&"k".to_string()).unwrap(),
            Some("new".to_string())
        );
        assert_eq!(cache.size().unwrap(), 1);

        let recorded = recorded.lock();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].cause, RemovalCause::Replaced);
        assert_eq!(recorded[0].value, "old");
        cache.stop();
    }

    #[tokio::test]
    async fn test_remove_fires_explicit() {
        let cache = started_cache("remove");
        let (listener, recorded) = recording_listener();
        cache.add_removal_listener(listener);

        cache.put("k".to_string(), "v".to_string()).await.unwrap();
        cache.remove(&"k".to_string()).await.unwrap();

        assert_eq!(cache.get_if_present(&"k".to_string()).unwrap(), None);
        assert_eq!(cache.size().unwrap(), 0);

        let recorded = recorded.lock();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].cause, RemovalCause::Explicit);
        cache.stop();
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_noop() {
        let cache = started_cache("remove-absent");
        let (listener, recorded) = recording_listener();
        cache.add_removal_listener(listener);

        cache.remove(&"ghost".to_string()).await.unwrap();

        assert!(recorded.lock().is_empty());
        cache.stop();
    }

    #[tokio::test]
    async fn test_remove_all() {
        let cache = started_cache("remove-all");
        let (listener, recorded) = recording_listener();
        cache.add_removal_listener(listener);

        for key in ["a", "b", "c"] {
            cache.put(key.to_string(), "v".to_string()).await.unwrap();
        }
        cache
            .remove_all(&["a".to_string(), "c".to_string(), "ghost".to_string()])
            .await
            .unwrap();

        assert_eq!(cache.size().unwrap(), 1);
        assert_eq!(
            cache.get_if_present(&"b".to_string()).unwrap(),
            Some("v".to_string())
        );

        let recorded = recorded.lock();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.iter().all(|n| n.cause == RemovalCause::Explicit));
        cache.stop();
    }

    #[tokio::test]
    async fn test_clear_fires_no_notifications() {
        let cache = started_cache("clear");
        let (listener, recorded) = recording_listener();
        cache.add_removal_listener(listener);

        cache.put("a".to_string(), "1".to_string()).await.unwrap();
        cache.put("b".to_string(), "2".to_string()).await.unwrap();
        cache.clear().await.unwrap();

        assert_eq!(cache.size().unwrap(), 0);
        assert!(recorded.lock().is_empty());
        cache.stop();
    }

    #[tokio::test]
    async fn test_put_if_absent() {
        let cache = started_cache("put-if-absent");

        assert_eq!(
            cache
                .put_if_absent("k".to_string(), "first".to_string())
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            cache
                .put_if_absent("k".to_string(), "second".to_string())
                .await
                .unwrap(),
            Some("first".to_string())
        );
        assert_eq!(
            cache.get_if_present(&"k".to_string()).unwrap(),
            Some("first".to_string())
        );
        assert_eq!(cache.size().unwrap(), 1);
        cache.stop();
    }

    #[tokio::test]
    async fn test_size_eviction_drops_soonest_deadlines() {
        let mut config = CacheConfig::new("evict");
        config.maximum_size = 3;
        let cache: Cache<String, String> = Cache::with_config(config);
        cache.start();
        let (listener, recorded) = recording_listener();
        cache.add_removal_listener(listener);

        for key in ["a", "b", "c"] {
            cache.put(key.to_string(), "v".to_string()).await.unwrap();
        }
        // At capacity: the next insert evicts a batch (here the whole
        // cache, since fewer than a full batch exist) before storing.
        cache.put("d".to_string(), "v".to_string()).await.unwrap();

        assert_eq!(cache.size().unwrap(), 1);
        assert_eq!(
            cache.get_if_present(&"d".to_string()).unwrap(),
            Some("v".to_string())
        );

        let recorded = recorded.lock();
        assert_eq!(recorded.len(), 3);
        assert!(recorded.iter().all(|n| n.cause == RemovalCause::Size));
        assert!(recorded.iter().all(|n| n.cause.was_evicted()));
        cache.stop();
    }

    #[tokio::test]
    async fn test_size_eviction_under_larger_capacity() {
        let mut config = CacheConfig::new("evict-batch");
        config.maximum_size = 10;
        let cache: Cache<String, String> = Cache::with_config(config);
        cache.start();

        for i in 0..11 {
            cache.put(format!("k{i}"), "v".to_string()).await.unwrap();
        }

        // The 11th insert found 10 scheduled, evicted a batch of 5, then
        // stored: 10 - 5 + 1.
        assert_eq!(cache.size().unwrap(), 6);
        assert_table_queue_agree(&cache);
        cache.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_with_loads_once() {
        let cache: Cache<String, String> = started_cache("single-load");
        let loader_calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let loader_calls = loader_calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_with("k".to_string(), || async move {
                        loader_calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok("loaded".to_string())
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), "loaded");
        }
        assert_eq!(loader_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.size().unwrap(), 1);
        cache.stop();
    }

    #[tokio::test]
    async fn test_failed_loader_leaves_no_partial_state() {
        let cache: Cache<String, String> = started_cache("load-failure");

        let result = cache
            .get_with("k".to_string(), || async {
                Err(anyhow::anyhow!("backend down"))
            })
            .await;

        assert!(matches!(result, Err(CacheError::Load(_))));
        assert_eq!(cache.get_if_present(&"k".to_string()).unwrap(), None);
        assert_eq!(cache.size().unwrap(), 0);

        // A later call may still succeed
        let value = cache
            .get_with("k".to_string(), || async { Ok("recovered".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "recovered");
        cache.stop();
    }

    #[tokio::test]
    async fn test_get_with_hit_skips_loader() {
        let cache = started_cache("load-hit");
        cache.put("k".to_string(), "cached".to_string()).await.unwrap();

        let value = cache
            .get_with("k".to_string(), || async {
                panic!("loader must not run on a hit")
            })
            .await
            .unwrap();
        assert_eq!(value, "cached");
        cache.stop();
    }

    #[tokio::test]
    async fn test_stop_clears_and_rejects() {
        let cache = started_cache("stop");
        cache.put("k".to_string(), "v".to_string()).await.unwrap();

        cache.stop();
        assert!(!cache.is_running());
        assert!(matches!(
            cache.get_if_present(&"k".to_string()),
            Err(CacheError::NotRunning(_))
        ));

        // Restart yields an empty, usable cache
        cache.start();
        assert_eq!(cache.size().unwrap(), 0);
        cache.put("k2".to_string(), "v2".to_string()).await.unwrap();
        assert_eq!(
            cache.get_if_present(&"k2".to_string()).unwrap(),
            Some("v2".to_string())
        );
        cache.stop();
    }

    #[tokio::test]
    async fn test_shutdown_is_stop() {
        let cache = started_cache("shutdown");
        cache.shutdown();
        assert!(!cache.is_running());
    }
}
