//! Expiry Queue Module
//!
//! A concurrency-safe priority structure ordered by expiry deadline, with
//! an async "take the earliest element once it is due" wait for the reaper.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::{sleep_until, Instant};

use crate::cache::entry::{CacheEntry, DelayElement};

// == Expiry Queue ==
/// Deadline-ordered queue of scheduled cache entries.
///
/// Elements are keyed by (deadline, sequence); the sequence counter is
/// owned by the queue and assigned at insertion, so ordering is a strict
/// total order. The internal lock is only ever held for short map
/// operations, never across an await.
///
/// Removal by predicate is a linear scan, O(n). Removals are rare relative
/// to inserts and capacities are modest, so this is a known performance
/// ceiling rather than a correctness concern.
pub struct ExpiryQueue<K, V> {
    inner: Mutex<BTreeMap<(Instant, u64), CacheEntry<K, V>>>,
    sequence: AtomicU64,
    notify: Notify,
}

impl<K, V> Default for ExpiryQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ExpiryQueue<K, V> {
    // == Constructor ==
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BTreeMap::new()),
            sequence: AtomicU64::new(0),
            notify: Notify::new(),
        }
    }

    // == Insert ==
    /// Schedules an entry for the given deadline and wakes the waiting
    /// reaper. Returns the element as scheduled.
    pub fn insert(&self, entry: CacheEntry<K, V>, deadline: Instant) -> DelayElement<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let element = DelayElement::new(entry.clone(), deadline, sequence);
        self.inner.lock().insert((deadline, sequence), entry);
        // The single waiter re-evaluates the earliest deadline on wake; a
        // stored permit covers inserts that land while it is not parked.
        self.notify.notify_one();
        element
    }

    // == Take Earliest When Due ==
    /// Waits until the earliest element's deadline has passed, then
    /// removes and returns it.
    ///
    /// Re-evaluates whenever a new element is inserted, so an insert with
    /// an earlier deadline shortens the wait. Cancel-safe: an element is
    /// only removed synchronously, never across an await.
    pub async fn take_earliest_when_due(&self) -> DelayElement<K, V> {
        loop {
            let next_deadline = {
                let mut inner = self.inner.lock();
                let head = inner.first_key_value().map(|(&key, _)| key);
                match head {
                    None => None,
                    Some((deadline, _)) if deadline <= Instant::now() => {
                        let ((deadline, sequence), entry) =
                            inner.pop_first().expect("peeked element vanished");
                        return DelayElement::new(entry, deadline, sequence);
                    }
                    Some((deadline, _)) => Some(deadline),
                }
            };

            match next_deadline {
                None => self.notify.notified().await,
                Some(deadline) => {
                    tokio::select! {
                        _ = sleep_until(deadline) => {}
                        _ = self.notify.notified() => {}
                    }
                }
            }
        }
    }

    // == Remove ==
    /// Removes an element by identity (deadline + sequence). Returns
    /// whether it was present.
    pub fn remove(&self, element: &DelayElement<K, V>) -> bool {
        self.inner
            .lock()
            .remove(&(element.deadline(), element.sequence()))
            .is_some()
    }

    // == Remove First Matching ==
    /// Removes and returns the first element (in deadline order) whose
    /// entry matches the predicate. Linear scan.
    pub fn remove_first_matching<P>(&self, pred: P) -> Option<DelayElement<K, V>>
    where
        P: Fn(&CacheEntry<K, V>) -> bool,
    {
        let mut inner = self.inner.lock();
        let found = inner
            .iter()
            .find(|&(_, entry)| pred(entry))
            .map(|(&key, _)| key);
        found.and_then(|key| {
            inner
                .remove(&key)
                .map(|entry| DelayElement::new(entry, key.0, key.1))
        })
    }

    // == Remove Matching ==
    /// Removes and returns every element whose entry matches the
    /// predicate, in deadline order. Linear scan.
    pub fn remove_matching<P>(&self, pred: P) -> Vec<DelayElement<K, V>>
    where
        P: Fn(&CacheEntry<K, V>) -> bool,
    {
        let mut inner = self.inner.lock();
        let found: Vec<(Instant, u64)> = inner
            .iter()
            .filter(|&(_, entry)| pred(entry))
            .map(|(&key, _)| key)
            .collect();
        found
            .into_iter()
            .filter_map(|key| {
                inner
                    .remove(&key)
                    .map(|entry| DelayElement::new(entry, key.0, key.1))
            })
            .collect()
    }

    // == Pop Earliest Batch ==
    /// Removes and returns up to `max` of the soonest-deadline elements,
    /// due or not. Used for size eviction.
    pub fn pop_earliest_batch(&self, max: usize) -> Vec<DelayElement<K, V>> {
        let mut inner = self.inner.lock();
        let mut batch = Vec::with_capacity(max.min(inner.len()));
        for _ in 0..max {
            match inner.pop_first() {
                Some(((deadline, sequence), entry)) => {
                    batch.push(DelayElement::new(entry, deadline, sequence));
                }
                None => break,
            }
        }
        batch
    }

    /// Counts elements whose entry matches the predicate. Test support.
    #[cfg(test)]
    pub(crate) fn count_matching<P>(&self, pred: P) -> usize
    where
        P: Fn(&CacheEntry<K, V>) -> bool,
    {
        self.inner.lock().values().filter(|&e| pred(e)).count()
    }

    // == Peek Earliest ==
    /// Returns (a copy of) the soonest-deadline element without removing
    /// it.
    pub fn peek_earliest(&self) -> Option<DelayElement<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .lock()
            .first_key_value()
            .map(|(&(deadline, sequence), entry)| {
                DelayElement::new(entry.clone(), deadline, sequence)
            })
    }

    // == Length ==
    /// Number of scheduled elements.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Clear ==
    /// Drops every scheduled element.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
