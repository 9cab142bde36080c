//! Bounded Cache Module
//!
//! Fixed-capacity key/value store with oldest-insertion (FIFO) eviction.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

// == Bounded Cache ==
/// Fixed-capacity store that evicts the oldest inserted entry first.
///
/// Keys are tracked in a VecDeque where:
/// - Front = Oldest insertion
/// - Back = Newest insertion
///
/// Reads never touch the order. Overwriting an existing key replaces its
/// value but keeps the key's original position, so eviction order is a pure
/// function of first-insertion order.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Insertion order of keys
    order: VecDeque<K>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Number of entries evicted due to capacity pressure
    evictions: u64,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            evictions: 0,
        }
    }

    // == Get ==
    /// Looks up a value without affecting eviction order.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    // == Set ==
    /// Stores a value, evicting the oldest entry if a new key would overflow.
    ///
    /// Returns the evicted key, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<K> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    // == Clear ==
    /// Removes all entries. The eviction counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let oldest = self.order.pop_front()?;
        self.entries.remove(&oldest);
        self.evictions += 1;
        Some(oldest)
    }

    /// Returns true if the key is cached.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of capacity evictions since construction.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
