//! Concurrent LFU Cache Implementation
//!
//! A thread-safe LFU cache using lock striping (segmented storage). This is the
//! multi-threaded counterpart to [`LfuCache`](crate::LfuCache).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLfuCache                              │
//! │                                                                      │
//! │  hash(key) % N  ──▶  Segment Selection                               │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │              │
//! │  │    Mutex     │ │    Mutex     │     │    Mutex     │              │
//! │  │  LfuSegment  │ │  LfuSegment  │     │  LfuSegment  │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capacity
//!
//! The total capacity is split so that segment `i` holds
//! `capacity / N + (i < capacity % N)` entries; the segment capacities add up
//! to exactly the requested capacity.
//!
//! ## Trade-offs
//!
//! Frequency tracking and eviction are per segment. An entry is only ever
//! compared with entries that hash to the same segment, so the cache can evict
//! a key that is more popular than some key in another segment. It can also
//! evict while the cache as a whole has free slots: holding at most `capacity`
//! distinct keys only guarantees no eviction when there is one segment.
//! Construct with a single segment, or use `Mutex<LfuCache>`, when exact
//! global LFU order matters more than parallelism.

extern crate alloc;

use crate::config::{ConcurrentLfuCacheConfig, LfuCacheConfig};
use crate::lfu::LfuSegment;
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

use super::{default_segment_count, MIN_DEFAULT_SEGMENT_CAPACITY};

/// A thread-safe LFU cache with segmented storage for high concurrency.
///
/// All methods take `&self`; share the cache between threads with `Arc`.
pub struct ConcurrentLfuCache<K, V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LfuSegment<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V> ConcurrentLfuCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
{
    /// Creates a new concurrent LFU cache with the specified total capacity.
    ///
    /// Uses [`default_segment_count`], reduced so that every segment gets at
    /// least 16 slots. Capacities below 32 get a single segment, which is
    /// exact LFU; a zero-capacity cache has a single empty segment.
    pub fn new(capacity: usize) -> Self {
        let segments = default_segment_count()
            .min(capacity / MIN_DEFAULT_SEGMENT_CAPACITY)
            .max(1);
        Self::with_segments(capacity, segments)
    }

    /// Creates a new concurrent LFU cache with a custom segment count.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero, or if `capacity` is non-zero and
    /// smaller than `segment_count`.
    pub fn with_segments(capacity: usize, segment_count: usize) -> Self {
        Self::with_segments_and_hasher(capacity, segment_count, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a new concurrent LFU cache from a configuration.
    ///
    /// Uses `hasher` if given, otherwise `S::default()`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`with_segments`](ConcurrentLfuCache::with_segments).
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_cache::concurrent::ConcurrentLfuCache;
    /// use lfu_cache::config::{ConcurrentCacheConfig, LfuCacheConfig};
    ///
    /// let config = ConcurrentCacheConfig {
    ///     base: LfuCacheConfig { capacity: 100 },
    ///     segments: 4,
    /// };
    /// let cache: ConcurrentLfuCache<String, i32> = ConcurrentLfuCache::init(config, None);
    /// assert_eq!(cache.capacity(), 100);
    /// assert_eq!(cache.segment_count(), 4);
    /// ```
    pub fn init(config: ConcurrentLfuCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_segments_and_hasher(
            config.base.capacity,
            config.segments,
            hasher.unwrap_or_default(),
        )
    }

    /// Creates a new concurrent LFU cache with a custom segment count and hasher.
    ///
    /// Every segment and the segment selector share clones of `hash_builder`.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero, or if `capacity` is non-zero and
    /// smaller than `segment_count`.
    pub fn with_segments_and_hasher(capacity: usize, segment_count: usize, hash_builder: S) -> Self {
        assert!(segment_count > 0, "segment_count must be greater than 0");
        assert!(
            capacity == 0 || capacity >= segment_count,
            "capacity must be >= segment_count"
        );

        let base = capacity / segment_count;
        let remainder = capacity % segment_count;

        let segments: Vec<_> = (0..segment_count)
            .map(|i| {
                let config = LfuCacheConfig {
                    capacity: base + usize::from(i < remainder),
                };
                Mutex::new(LfuSegment::init(config, hash_builder.clone()))
            })
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
        }
    }

    #[inline]
    fn segment_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) % self.segments.len()
    }

    /// Returns the total capacity across all segments.
    pub fn capacity(&self) -> usize {
        self.segments.iter().map(|s| s.lock().cap()).sum()
    }

    /// Returns the number of segments in the cache.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the total number of entries across all segments.
    ///
    /// Segments are locked one at a time, so concurrent writers can make the
    /// result stale by the time it is returned.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Gets a value from the cache, incrementing its frequency.
    ///
    /// This clones the value to avoid holding the lock. For zero-copy access,
    /// use `get_with()` instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).cloned()
    }

    /// Gets a value and applies a function to it while holding the lock.
    ///
    /// Counts as an access exactly like `get()`.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).map(f)
    }

    /// Gets a mutable reference to a value and applies a function to it while
    /// holding the lock.
    ///
    /// Counts as an access exactly like `get()`.
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get_mut(key).map(f)
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// Follows the [`LfuCache::put`](crate::LfuCache::put) contract within the
    /// key's segment: an overwrite returns the previous value, and a new key
    /// arriving at a full segment returns the entry evicted from that segment.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let idx = self.segment_index(&key);
        let mut segment = self.segments[idx].lock();
        segment.put(key, value)
    }

    /// Removes a key from the cache, returning the value if it existed.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.remove(key)
    }

    /// Returns `true` if the cache contains the specified key.
    ///
    /// Does not count as an access.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let segment = self.segments[idx].lock();
        segment.contains(key)
    }

    /// Returns the current access count of the key without incrementing it.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.segment_index(key);
        let segment = self.segments[idx].lock();
        segment.frequency(key)
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }

    /// Returns LFU metrics summed over every segment.
    ///
    /// Counters are added together. `min_frequency` and `max_frequency` are the
    /// extremes over non-empty segments, and `active_frequency_levels` counts
    /// each segment's levels separately.
    pub fn lfu_metrics(&self) -> LfuCacheMetrics {
        let mut total = LfuCacheMetrics::new(0);
        let mut bounds: Option<(u64, u64)> = None;
        let mut levels = 0usize;

        for segment in self.segments.iter() {
            let segment = segment.lock();
            let metrics = segment.metrics();

            total.core.requests += metrics.core.requests;
            total.core.cache_hits += metrics.core.cache_hits;
            total.core.insertions += metrics.core.insertions;
            total.core.updates += metrics.core.updates;
            total.core.evictions += metrics.core.evictions;
            total.core.removals += metrics.core.removals;
            total.core.entries += metrics.core.entries;
            total.core.capacity += metrics.core.capacity;
            total.total_frequency_increments += metrics.total_frequency_increments;
            levels += metrics.active_frequency_levels as usize;

            if !segment.is_empty() {
                bounds = Some(match bounds {
                    Some((min, max)) => (
                        min.min(metrics.min_frequency),
                        max.max(metrics.max_frequency),
                    ),
                    None => (metrics.min_frequency, metrics.max_frequency),
                });
            }
        }

        total.observe_frequency_levels(levels, bounds);
        total
    }

    #[cfg(test)]
    fn debug_validate_invariants(&self) {
        for segment in self.segments.iter() {
            segment.lock().debug_validate_invariants();
        }
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.lfu_metrics().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLFU"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLfuCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Clone + Send,
    S: BuildHasher + Clone + Send,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLfuCache")
            .field("segment_count", &self.segments.len())
            .field("total_len", &self.len())
            .finish()
    }
}
