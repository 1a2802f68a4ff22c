//! Concurrent Cache Implementation
//!
//! This module provides [`ConcurrentLfuCache`], a thread-safe LFU cache built
//! from independently locked segments.
//!
//! # Architecture
//!
//! - The key space is partitioned across segments using hash-based sharding
//! - Each segment is a complete LFU engine behind its own `parking_lot::Mutex`
//! - Operations lock only the segment that owns the key
//!
//! Eviction is exact LFU within a segment. Two keys in different segments never
//! compete for the same slot, so the concurrent cache approximates global LFU;
//! a cache with a single segment is exact.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! Every successful `get()` increments the key's frequency and moves it to
//! another bucket, so a read is a write. An `RwLock` would hand out write locks
//! on every access anyway; `parking_lot::Mutex` is cheaper and says what
//! actually happens. Parallelism comes from segmentation instead.
//!
//! # Default Segment Count
//!
//! See [`default_segment_count`]. `new()` also caps the count so that every
//! segment holds at least 16 entries, which makes caches below 32 entries a
//! single exact segment. Use `with_segments()` to choose the count explicitly.
//!
//! # Example
//!
//! ```rust
//! use lfu_cache::concurrent::ConcurrentLfuCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLfuCache::new(1000));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key_{}_{}", t, i);
//!                 cache.put(key.clone(), i);
//!                 let _ = cache.get(&key);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! // Keys only compete within their own segment, so a crowded segment may
//! // have evicted some of them.
//! assert!(cache.len() <= 400);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get()` clones the value so no reference outlives the segment lock. Use
//! `get_with()` to work on the value while the lock is held:
//!
//! ```rust
//! use lfu_cache::concurrent::ConcurrentLfuCache;
//!
//! let cache = ConcurrentLfuCache::new(16);
//! cache.put("greeting", String::from("hello world"));
//!
//! let len = cache.get_with(&"greeting", |value| value.len());
//! assert_eq!(len, Some(11));
//! ```

mod lfu;

pub use self::lfu::ConcurrentLfuCache;

/// Segment count used when none is given and the CPU count is unknown.
const FALLBACK_SEGMENT_COUNT: usize = 16;

/// Upper bound on the default segment count.
const MAX_DEFAULT_SEGMENT_COUNT: usize = 64;

/// Smallest per-segment capacity `ConcurrentLfuCache::new` will create.
const MIN_DEFAULT_SEGMENT_CAPACITY: usize = 16;

/// Returns the default number of segments.
///
/// With the `std` feature this is `min(available_parallelism * 4, 64)`;
/// otherwise it is 16.
#[inline]
pub fn default_segment_count() -> usize {
    #[cfg(feature = "std")]
    {
        if let Ok(cpus) = std::thread::available_parallelism() {
            return cpus
                .get()
                .saturating_mul(4)
                .min(MAX_DEFAULT_SEGMENT_COUNT);
        }
    }
    FALLBACK_SEGMENT_COUNT.min(MAX_DEFAULT_SEGMENT_COUNT)
}
