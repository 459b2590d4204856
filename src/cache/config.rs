//! Cache configuration.

/// Configuration for a cache instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    /// `None` leaves the cache unbounded, so entries only leave when removed.
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    /// An unbounded cache that never evicts on its own.
    pub fn unbounded() -> Self {
        Self::default()
    }
}
