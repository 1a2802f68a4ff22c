//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use lfu_cache::config::LfuCacheConfig;
//! use lfu_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 100 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.cap(), 100);
//! ```

use core::fmt;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. A capacity of
///   zero is valid and produces a cache that never stores anything.
///
/// # Examples
///
/// ```
/// use lfu_cache::config::LfuCacheConfig;
/// use lfu_cache::LfuCache;
///
/// let config = LfuCacheConfig { capacity: 0 };
/// let mut cache: LfuCache<&str, i32> = LfuCache::init(config, None);
/// cache.put("a", 1);
/// assert_eq!(cache.get(&"a"), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: usize,
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
