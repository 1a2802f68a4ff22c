//! Least Frequently Used Cache Implementation.
//!
//! The LFU cache evicts the entry with the fewest accesses when it is full.
//! Entries with the same access count are evicted least-recently-touched
//! first.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ map: HashMap<K, Handle>        entries: Arena<LfuEntry<K, V>>        │
//! │                                                                      │
//! │   "a" ─────────────────────▶  [h0] key "a", value, frequency 3       │
//! │   "b" ─────────────────────▶  [h1] key "b", value, frequency 1       │
//! │   "c" ─────────────────────▶  [h2] key "c", value, frequency 1       │
//! │                                                                      │
//! │ buckets: BTreeMap<u64, List>                                         │
//! │                                                                      │
//! │   1 ─▶ front [h2] ◀─▶ [h1] back   ◀── min_frequency, evict from back │
//! │   3 ─▶ front [h0] back                                               │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each arena slot holds a key's value together with its access count. The
//! map is the position index: it resolves a key to the handle that locates
//! the entry inside its bucket list, so an entry can be unlinked in O(1)
//! when its frequency changes. `min_frequency` names the bucket the next
//! eviction comes from.
//!
//! # Touches
//!
//! A successful `get`, `get_mut`, or a `put` that overwrites an existing key
//! is a *touch*: the key's frequency goes up by one and it moves to the front
//! of the next bucket. Inserting a new key puts it at the front of bucket 1.
//! `peek`, `contains` and `frequency` never touch.

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::list::{Arena, Handle, List};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the number of entries reserved up front.
///
/// Larger caches grow their storage as entries arrive.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// A stored key-value pair and its access count.
struct LfuEntry<K, V> {
    key: K,
    value: V,
    frequency: u64,
}

/// Internal LFU segment containing the actual cache algorithm.
///
/// This is shared between `LfuCache` (single-threaded) and
/// `ConcurrentLfuCache` (multi-threaded).
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Frequency of the bucket holding the eviction candidate; 0 when empty
    min_frequency: u64,

    /// Map from keys to the handle of their entry
    map: HashMap<K, Handle, S>,

    /// Storage for entries and the links of every bucket list
    entries: Arena<LfuEntry<K, V>>,

    /// Map from frequency to the keys at that frequency, most recent first.
    /// Buckets are removed as soon as they become empty.
    buckets: BTreeMap<u64, List>,

    /// Metrics for tracking cache performance and frequency distribution
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuSegment<K, V, S> {
    /// Creates a new LFU segment from a configuration and hash builder.
    pub(crate) fn init(config: LfuCacheConfig, hash_builder: S) -> Self {
        let reserved = config.capacity.min(MAX_PREALLOCATED_ENTRIES);
        LfuSegment {
            config,
            min_frequency: 0,
            map: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            entries: Arena::with_capacity(reserved),
            buckets: BTreeMap::new(),
            metrics: LfuCacheMetrics::new(config.capacity as u64),
        }
    }

    /// Returns the maximum number of key-value pairs the segment can hold.
    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Returns the current number of key-value pairs in the segment.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the segment contains no key-value pairs.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the lowest access frequency in the segment.
    #[inline]
    pub(crate) fn min_frequency(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.min_frequency)
        }
    }

    /// Returns a snapshot of the metrics, including the current frequency levels.
    pub(crate) fn metrics(&self) -> LfuCacheMetrics {
        let mut metrics = self.metrics.clone();
        let bounds = match (self.buckets.keys().next(), self.buckets.keys().next_back()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        };
        metrics.observe_frequency_levels(self.buckets.len(), bounds);
        metrics
    }

    /// Increments the frequency of the entry at `handle` and moves it to the
    /// front of its new bucket.
    fn touch(&mut self, handle: Handle) {
        let entry = &mut self.entries[handle];
        let old_frequency = entry.frequency;
        // Saturated entries are moved to the front of their own bucket.
        let new_frequency = old_frequency.saturating_add(1);
        entry.frequency = new_frequency;

        let bucket = self.buckets.get_mut(&old_frequency);
        debug_assert!(bucket.is_some(), "entry missing from bucket {}", old_frequency);
        if let Some(bucket) = bucket {
            bucket.unlink(&mut self.entries, handle);
            if bucket.is_empty() {
                self.buckets.remove(&old_frequency);
                if old_frequency == self.min_frequency {
                    self.min_frequency = new_frequency;
                }
            }
        }
        self.buckets
            .entry(new_frequency)
            .or_default()
            .push_front(&mut self.entries, handle);

        self.metrics
            .record_frequency_increment(old_frequency, new_frequency);
    }

    /// Unlinks the entry at `handle` from its bucket and frees its slot.
    ///
    /// Keeps `min_frequency` pointing at the lowest non-empty bucket. The map
    /// entry is left for the caller to remove.
    fn detach(&mut self, handle: Handle) -> Option<LfuEntry<K, V>> {
        let frequency = self.entries.get(handle)?.frequency;
        if let Some(bucket) = self.buckets.get_mut(&frequency) {
            bucket.unlink(&mut self.entries, handle);
            if bucket.is_empty() {
                self.buckets.remove(&frequency);
                if frequency == self.min_frequency {
                    self.min_frequency = self.buckets.keys().next().copied().unwrap_or(0);
                }
            }
        }
        self.entries.remove(handle)
    }

    /// Removes the eviction candidate: the back of the lowest-frequency bucket.
    fn remove_lfu(&mut self) -> Option<(K, V)> {
        let handle = self.buckets.get(&self.min_frequency)?.back()?;
        let entry = self.detach(handle)?;
        self.map.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Returns a reference to the value corresponding to the key, touching it.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&handle) = self.map.get(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.touch(handle);
        self.metrics.record_hit();
        Some(&self.entries[handle].value)
    }

    /// Returns a mutable reference to the value corresponding to the key, touching it.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&handle) = self.map.get(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.touch(handle);
        self.metrics.record_hit();
        Some(&mut self.entries[handle].value)
    }

    /// Returns a reference to the value without touching it.
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = *self.map.get(key)?;
        self.entries.get(handle).map(|entry| &entry.value)
    }

    /// Returns `true` if the key is stored. Does not touch it.
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the current access count of the key without touching it.
    pub(crate) fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = *self.map.get(key)?;
        self.entries.get(handle).map(|entry| entry.frequency)
    }

    /// Inserts a key-value pair into the segment.
    ///
    /// Returns the displaced pair: the key with its previous value when the key
    /// was already present, or the evicted entry when a new key forced an
    /// eviction. A zero-capacity segment ignores the call.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if self.config.capacity == 0 {
            return None;
        }

        if let Some(&handle) = self.map.get(&key) {
            let old_value = mem::replace(&mut self.entries[handle].value, value);
            self.touch(handle);
            self.metrics.core.record_update();
            return Some((key, old_value));
        }

        let evicted = if self.len() >= self.config.capacity {
            let evicted = self.remove_lfu();
            if evicted.is_some() {
                self.metrics.core.record_eviction();
            }
            evicted
        } else {
            None
        };

        let handle = self.entries.insert(LfuEntry {
            key: key.clone(),
            value,
            frequency: 1,
        });
        self.buckets
            .entry(1)
            .or_default()
            .push_front(&mut self.entries, handle);
        self.map.insert(key, handle);
        self.min_frequency = 1;
        self.metrics.core.record_insertion();

        evicted
    }

    /// Removes a key from the segment, returning the value if the key was present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.remove(key)?;
        let entry = self.detach(handle)?;
        self.metrics.core.record_removal();
        Some(entry.value)
    }

    /// Clears the segment, removing all key-value pairs.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.entries.clear();
        self.buckets.clear();
        self.min_frequency = 0;
        self.metrics.core.record_clear();
    }

    /// Removes and returns the eviction candidate.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        let evicted = self.remove_lfu()?;
        self.metrics.core.record_eviction();
        Some(evicted)
    }

    /// Returns the eviction candidate without removing or touching it.
    pub(crate) fn peek_lfu(&self) -> Option<(&K, &V)> {
        let handle = self.buckets.get(&self.min_frequency)?.back()?;
        let entry = self.entries.get(handle)?;
        Some((&entry.key, &entry.value))
    }

    /// Asserts every structural invariant of the segment. O(n).
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        assert_eq!(self.map.len(), self.entries.len(), "map and arena disagree");
        assert!(self.len() <= self.config.capacity, "capacity exceeded");

        if self.is_empty() {
            assert!(self.buckets.is_empty(), "empty cache has buckets");
            assert_eq!(self.min_frequency, 0);
            return;
        }

        assert_eq!(
            self.buckets.keys().next(),
            Some(&self.min_frequency),
            "min_frequency is not the lowest bucket"
        );

        let mut total = 0usize;
        for (&frequency, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket {} kept", frequency);
            bucket.debug_validate(&self.entries);
            for (handle, entry) in bucket.iter(&self.entries) {
                assert_eq!(entry.frequency, frequency, "entry in the wrong bucket");
                assert_eq!(
                    self.map.get(&entry.key),
                    Some(&handle),
                    "map does not point at the bucket entry"
                );
                total += 1;
            }
        }
        assert_eq!(total, self.len(), "buckets and map hold different keys");
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .field("frequency_levels", &self.buckets.len())
            .finish()
    }
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks the access frequency of each entry and evicts the least
/// frequently used entry when it is full. Among entries with the lowest
/// frequency, the one touched least recently is evicted. `get` and `put` run
/// in O(1) amortized time.
///
/// A capacity of zero is allowed: such a cache stores nothing, every `get`
/// misses and every `put` is a no-op.
///
/// # Examples
///
/// ```
/// use lfu_cache::LfuCache;
///
/// let mut cache = LfuCache::new(2);
///
/// cache.put(1, 1);
/// cache.put(2, 2);
/// assert_eq!(cache.get(&1), Some(&1)); // key 1 now has frequency 2
///
/// // Key 2 has the lowest frequency and is evicted.
/// assert_eq!(cache.put(3, 3), Some((2, 2)));
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&3), Some(&3));
/// assert_eq!(cache.get(&1), Some(&1));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LfuCache<K, V, DefaultHashBuilder> {
    /// Creates a new LFU cache holding at most `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let cache: LfuCache<&str, u32> = LfuCache::new(10);
    /// assert_eq!(cache.cap(), 10);
    /// ```
    pub fn new(capacity: usize) -> Self {
        LfuCache::init(LfuCacheConfig { capacity }, None)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache from a configuration.
    ///
    /// Uses `hasher` if given, otherwise `S::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::config::LfuCacheConfig;
    /// use lfu_cache::LfuCache;
    ///
    /// let config = LfuCacheConfig { capacity: 100 };
    /// let cache: LfuCache<String, i32> = LfuCache::init(config, None);
    /// assert_eq!(cache.cap(), 100);
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self {
            segment: LfuSegment::init(config, hasher.unwrap_or_default()),
        }
    }

    /// Creates a new LFU cache with the specified capacity and hash builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let cache: LfuCache<&str, u32, _> = LfuCache::with_hasher(10, RandomState::new());
    /// assert!(cache.is_empty());
    /// ```
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            segment: LfuSegment::init(LfuCacheConfig { capacity }, hash_builder),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.cap()
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// A hit increments the key's frequency by one. A miss changes nothing.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Counts as an access exactly like [`get`](Self::get).
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Returns a reference to the value without counting an access.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// assert_eq!(cache.peek(&"a"), Some(&1));
    /// assert_eq!(cache.frequency(&"a"), Some(1));
    /// ```
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.peek(key)
    }

    /// Returns `true` if the cache contains the key. Does not count an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// Returns how many times the key has been accessed since it was inserted.
    ///
    /// A freshly inserted key has frequency 1. Does not count an access.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.frequency(key)
    }

    /// Returns the lowest frequency among stored keys, or `None` if empty.
    #[inline]
    pub fn min_frequency(&self) -> Option<u64> {
        self.segment.min_frequency()
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key is already present its value is replaced and its frequency
    /// is incremented, exactly as a [`get`](Self::get) would; the key and its
    /// previous value are returned.
    ///
    /// Otherwise the key is stored with frequency 1. If the cache was full, the
    /// least frequently used entry (least recently touched among ties) is
    /// evicted first and returned.
    ///
    /// On a zero-capacity cache this does nothing and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// assert_eq!(cache.put(1, "one"), None);
    /// assert_eq!(cache.put(1, "uno"), Some((1, "one")));
    /// assert_eq!(cache.frequency(&1), Some(2));
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.segment.put(key, value)
    }

    /// Removes a key from the cache, returning the value at the key if the key
    /// was previously in the cache.
    ///
    /// This bypasses the eviction policy; the removal is not counted as an
    /// eviction.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Clears the cache, removing all key-value pairs.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Removes and returns the eviction candidate: the least frequently used
    /// entry, least recently touched among ties.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.segment.pop()
    }

    /// Returns the entry the next eviction would remove, without removing or
    /// touching it.
    #[inline]
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.segment.peek_lfu()
    }

    /// Returns a snapshot of the cache's LFU metrics.
    pub fn lfu_metrics(&self) -> LfuCacheMetrics {
        self.segment.metrics()
    }

    /// Asserts the cache's internal invariants, panicking on the first violation.
    ///
    /// Walks every entry, so this is O(n). Only available in test and debug
    /// builds.
    #[cfg(any(test, debug_assertions))]
    #[doc(hidden)]
    pub fn debug_validate_invariants(&self) {
        self.segment.debug_validate_invariants()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
