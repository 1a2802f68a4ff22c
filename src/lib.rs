#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ frequency buckets (sparse, ordered)                                  │
//! │                                                                      │
//! │   1 ─▶ [ newest ] ◀─▶ [ ... ] ◀─▶ [ oldest ]  ◀── evicted first      │
//! │   2 ─▶ [ newest ] ◀─▶ [ oldest ]                                     │
//! │   7 ─▶ [ only ]                                                      │
//! │                                                                      │
//! │ min_frequency = 1                                                    │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every key sits in the bucket for its access count. A touch unlinks the key
//! and pushes it onto the front of the next bucket; eviction pops the back of
//! the lowest bucket. Both are O(1).
//!
//! ## Configuration
//!
//! ```rust
//! use lfu_cache::LfuCache;
//! use lfu_cache::config::LfuCacheConfig;
//!
//! let config = LfuCacheConfig { capacity: 2 };
//! let mut cache: LfuCache<&str, i32> = LfuCache::init(config, None);
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! for _ in 0..10 {
//!     cache.get(&"popular");
//! }
//!
//! cache.put("new", 3); // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"popular").is_some());
//! assert!(cache.get(&"rare").is_none());
//! ```
//!
//! ## Modules
//!
//! - [`lfu`]: Least Frequently Used cache implementation
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - `concurrent`: Thread-safe segmented cache (requires `concurrent` feature)

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Slot arena and intrusive doubly linked lists.
///
/// Internal infrastructure holding every cache entry and the frequency bucket
/// links between them. Links are generation-checked handles, not pointers.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached, breaking ties by recency.
pub mod lfu;

/// Cache metrics system.
///
/// Counters for hits, misses, evictions and frequency distribution, reported
/// through a common [`metrics::CacheMetrics`] interface.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Provides a thread-safe LFU cache that partitions the key space across
/// multiple segments, each protected by its own lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use lfu::LfuCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLfuCache;
