//! Cache Metrics System
//!
//! Counters describing how a cache has been used, reported as a
//! `BTreeMap<String, f64>` through the [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Test and benchmark comparisons diff cleanly
//! - **Stable serialization**: Exports have predictable key ordering
//!
//! The O(log n) lookup cost is irrelevant with a few dozen metric keys.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Counters common to every cache policy.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get` / `get_mut`) made to the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new keys stored
    pub insertions: u64,

    /// Number of `put` calls that overwrote an existing key
    pub updates: u64,

    /// Number of entries removed by the eviction policy
    pub evictions: u64,

    /// Number of entries removed explicitly by the caller
    pub removals: u64,

    /// Number of entries currently stored
    pub entries: u64,

    /// Maximum number of entries the cache may hold
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters for a cache of the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key being stored.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.entries += 1;
    }

    /// Records an existing key receiving a new value.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry removed by the eviction policy.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records an entry removed explicitly by the caller.
    pub fn record_removal(&mut self) {
        self.removals += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records every entry being dropped at once.
    pub fn record_clear(&mut self) {
        self.removals += self.entries;
        self.entries = 0;
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of the capacity currently in use, between 0.0 and 1.0.
    ///
    /// Returns 0.0 for a zero-capacity cache.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.entries as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts the core counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics.insert("utilization".to_string(), self.utilization());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LFU").
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_rates() {
        let mut metrics = CoreCacheMetrics::new(4);
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.miss_rate(), 0.0);

        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        assert_eq!(metrics.requests, 4);
        assert_eq!(metrics.hit_rate(), 0.75);
        assert_eq!(metrics.miss_rate(), 0.25);
    }

    #[test]
    fn test_core_metrics_entry_gauge() {
        let mut metrics = CoreCacheMetrics::new(4);
        metrics.record_insertion();
        metrics.record_insertion();
        metrics.record_insertion();
        metrics.record_eviction();
        metrics.record_removal();

        assert_eq!(metrics.entries, 1);
        assert_eq!(metrics.utilization(), 0.25);

        metrics.record_clear();
        assert_eq!(metrics.entries, 0);
        assert_eq!(metrics.removals, 2);
    }

    #[test]
    fn test_zero_capacity_utilization() {
        let metrics = CoreCacheMetrics::new(0);
        assert_eq!(metrics.utilization(), 0.0);
    }

    #[test]
    fn test_btreemap_keys_are_sorted() {
        let mut metrics = CoreCacheMetrics::new(2);
        metrics.record_miss();
        let map = metrics.to_btreemap();

        let keys: alloc::vec::Vec<&String> = map.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(map["cache_misses"], 1.0);
        assert!(map.contains_key("eviction_rate"));
    }
}
