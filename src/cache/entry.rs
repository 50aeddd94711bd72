//! Cache Entry Module
//!
//! Defines the stored key/value pair and the deadline-bearing element the
//! expiry queue orders entries by.

use std::cmp::Ordering;

use tokio::time::Instant;

// == Cache Entry ==
/// An immutable (key, value) pair as stored in the cache.
///
/// Entries are never mutated in place; an overwrite replaces the whole
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The entry's key
    pub key: K,
    /// The entry's value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

// == Delay Element ==
/// An entry scheduled for expiry: the entry itself, the absolute deadline
/// at which it becomes due, and a sequence number breaking deadline ties.
///
/// Elements order by ascending deadline, then ascending sequence. Sequence
/// numbers are unique within a queue, so the order is strictly total: no
/// two elements ever compare equal.
#[derive(Debug, Clone)]
pub struct DelayElement<K, V> {
    entry: CacheEntry<K, V>,
    deadline: Instant,
    sequence: u64,
}

impl<K, V> DelayElement<K, V> {
    /// Creates an element. Only the expiry queue assigns sequences, so
    /// construction stays crate-internal.
    pub(crate) fn new(entry: CacheEntry<K, V>, deadline: Instant, sequence: u64) -> Self {
        Self {
            entry,
            deadline,
            sequence,
        }
    }

    /// The scheduled entry.
    pub fn entry(&self) -> &CacheEntry<K, V> {
        &self.entry
    }

    /// Consumes the element, returning the scheduled entry.
    pub fn into_entry(self) -> CacheEntry<K, V> {
        self.entry
    }

    /// Absolute point in time at which the entry becomes due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Queue-unique sequence number, assigned at insertion.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether the deadline has passed as of `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline <= now
    }
}

// Identity and ordering use only (deadline, sequence); the carried entry
// takes no part in comparisons.
impl<K, V> PartialEq for DelayElement<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl<K, V> Eq for DelayElement<K, V> {}

impl<K, V> PartialOrd for DelayElement<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> Ord for DelayElement<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.sequence.cmp(&other.sequence))
    }
}
