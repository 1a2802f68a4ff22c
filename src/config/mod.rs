//! Cache Configuration Module
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No constructors or builder methods needed
//!
//! | Config | Cache |
//! |--------|-------|
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) |
//! | `ConcurrentLfuCacheConfig` | `ConcurrentLfuCache` (requires `concurrent` feature) |
//!
//! # Examples
//!
//! ```
//! use lfu_cache::config::LfuCacheConfig;
//! use lfu_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 1000 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

pub mod lfu;

pub use lfu::LfuCacheConfig;

/// Generic configuration wrapper for concurrent caches.
///
/// Wraps a base cache configuration and adds the number of independently
/// locked segments the key space is sharded across.
///
/// # Sizing Note
///
/// `base.capacity` applies to the **entire cache**. It is split across the
/// segments so that the per-segment capacities add up to exactly
/// `base.capacity`. Eviction decisions are made per segment.
///
/// # Example
///
/// ```ignore
/// use lfu_cache::config::{ConcurrentCacheConfig, ConcurrentLfuCacheConfig, LfuCacheConfig};
///
/// let config: ConcurrentLfuCacheConfig = ConcurrentCacheConfig {
///     base: LfuCacheConfig { capacity: 10_000 },
///     segments: 16,
/// };
/// ```
#[cfg(feature = "concurrent")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ConcurrentCacheConfig<C> {
    /// Base configuration for the underlying cache algorithm
    pub base: C,
    /// Number of segments for sharding (more segments = less contention)
    pub segments: usize,
}

#[cfg(feature = "concurrent")]
impl<C: core::fmt::Debug> core::fmt::Debug for ConcurrentCacheConfig<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentCacheConfig")
            .field("base", &self.base)
            .field("segments", &self.segments)
            .finish()
    }
}

#[cfg(feature = "concurrent")]
/// Configuration for a concurrent LFU cache.
/// Type alias for `ConcurrentCacheConfig<LfuCacheConfig>`.
pub type ConcurrentLfuCacheConfig = ConcurrentCacheConfig<LfuCacheConfig>;

#[cfg(all(test, feature = "concurrent"))]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_lfu_config_creation() {
        let config: ConcurrentLfuCacheConfig = ConcurrentCacheConfig {
            base: LfuCacheConfig { capacity: 1000 },
            segments: 16,
        };
        assert_eq!(config.base.capacity, 1000);
        assert_eq!(config.segments, 16);
    }
}
