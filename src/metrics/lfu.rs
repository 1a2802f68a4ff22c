//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends [`CoreCacheMetrics`]).
///
/// The frequency-level fields describe the cache at the moment the snapshot
/// was taken; the counters accumulate over the cache's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Lowest access frequency among stored entries (0 when empty)
    pub min_frequency: u64,

    /// Highest access frequency among stored entries (0 when empty)
    pub max_frequency: u64,

    /// Total number of frequency increments (one per touch)
    pub total_frequency_increments: u64,

    /// Number of distinct frequency levels currently in use
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates a new LfuCacheMetrics instance for a cache of the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            min_frequency: 0,
            max_frequency: 0,
            total_frequency_increments: 0,
            active_frequency_levels: 0,
        }
    }

    /// Records one touch moving an entry from `old_frequency` to `new_frequency`.
    pub fn record_frequency_increment(&mut self, old_frequency: u64, new_frequency: u64) {
        debug_assert!(new_frequency >= old_frequency);
        self.total_frequency_increments += 1;
    }

    /// Records a lookup hit.
    pub fn record_hit(&mut self) {
        self.core.record_hit();
    }

    /// Records a lookup miss.
    pub fn record_miss(&mut self) {
        self.core.record_miss();
    }

    /// Overwrites the frequency-level gauges with the cache's current shape.
    ///
    /// `bounds` is `(lowest, highest)` frequency, or `None` when the cache is empty.
    pub fn observe_frequency_levels(&mut self, levels: usize, bounds: Option<(u64, u64)>) {
        self.active_frequency_levels = levels as u64;
        let (min, max) = bounds.unwrap_or((0, 0));
        self.min_frequency = min;
        self.max_frequency = max;
    }

    /// Frequency increments per lookup hit, or 0.0 if no hits have occurred.
    ///
    /// Overwriting `put`s increment without counting as hits, so a write-heavy
    /// workload pushes this above 1.0.
    pub fn increments_per_hit(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.total_frequency_increments as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Spread between the highest and lowest stored frequency.
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("increments_per_hit".to_string(), self.increments_per_hit());

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_counters() {
        let mut metrics = LfuCacheMetrics::new(8);
        metrics.record_frequency_increment(1, 2);
        metrics.record_hit();
        metrics.record_frequency_increment(2, 3);
        metrics.record_hit();
        metrics.record_miss();

        assert_eq!(metrics.total_frequency_increments, 2);
        assert_eq!(metrics.core.cache_hits, 2);
        assert_eq!(metrics.core.requests, 3);
        assert_eq!(metrics.increments_per_hit(), 1.0);
    }

    #[test]
    fn test_hits_leave_frequency_gauges_alone() {
        let mut metrics = LfuCacheMetrics::new(8);
        metrics.record_frequency_increment(1, 2);
        metrics.record_hit();
        assert_eq!(metrics.max_frequency, 0);

        metrics.observe_frequency_levels(1, Some((2, 2)));
        assert_eq!(metrics.max_frequency, 2);
    }

    #[test]
    fn test_increments_per_hit_counts_overwrites() {
        let mut metrics = LfuCacheMetrics::new(8);
        assert_eq!(metrics.increments_per_hit(), 0.0);

        // one lookup hit plus two overwriting writes
        metrics.record_frequency_increment(1, 2);
        metrics.record_hit();
        metrics.record_frequency_increment(2, 3);
        metrics.record_frequency_increment(3, 4);

        assert_eq!(metrics.increments_per_hit(), 3.0);
        assert_eq!(metrics.metrics()["increments_per_hit"], 3.0);
    }

    #[test]
    fn test_observe_frequency_levels() {
        let mut metrics = LfuCacheMetrics::new(8);
        metrics.observe_frequency_levels(3, Some((2, 9)));
        assert_eq!(metrics.min_frequency, 2);
        assert_eq!(metrics.max_frequency, 9);
        assert_eq!(metrics.frequency_range(), 7);

        metrics.observe_frequency_levels(0, None);
        assert_eq!(metrics.active_frequency_levels, 0);
        assert_eq!(metrics.frequency_range(), 0);
    }

    #[test]
    fn test_report_contains_lfu_keys() {
        let metrics = LfuCacheMetrics::new(8);
        let map = metrics.metrics();
        assert_eq!(metrics.algorithm_name(), "LFU");
        for key in [
            "min_frequency",
            "max_frequency",
            "active_frequency_levels",
            "total_frequency_increments",
            "increments_per_hit",
            "hit_rate",
        ] {
            assert!(map.contains_key(key), "missing {}", key);
        }
    }
}
