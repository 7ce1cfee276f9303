//! Cache configuration types and builder

use std::time::Duration;

/// Which entries go first when the cache is over capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Least recently read or written entry first
    Lru,
    /// Oldest insertion first
    #[default]
    Fifo,
    /// Never evict; capacity is advisory
    None,
}

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries (None = unlimited)
    pub max_size: Option<usize>,

    /// Time-to-live measured from insertion (None = no expiration)
    pub ttl: Option<Duration>,

    pub eviction_policy: EvictionPolicy,

    /// Extra entries evicted beyond the overflow once `max_size` is
    /// exceeded, so a full cache is not trimmed on every insert.
    pub trim_headroom: usize,

    /// Whether to collect hit/miss counters
    pub track_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: None,
            ttl: None,
            eviction_policy: EvictionPolicy::Fifo,
            trim_headroom: 0,
            track_metrics: true,
        }
    }
}

impl CacheConfig {
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Unbounded cache whose entries expire after `duration`
    pub fn ttl(duration: Duration) -> Self {
        Self { ttl: Some(duration), eviction_policy: EvictionPolicy::None, ..Self::default() }
    }

    /// Bounded LRU cache without expiration
    pub fn lru(max_size: usize) -> Self {
        Self { max_size: Some(max_size), eviction_policy: EvictionPolicy::Lru, ..Self::default() }
    }

    /// Bounded cache with expiration, trimmed oldest-first.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use hotelix_common::cache::CacheConfig;
    ///
    /// let config = CacheConfig::ttl_fifo(Duration::from_secs(60), 100).with_headroom(10);
    /// assert_eq!(config.max_size, Some(100));
    /// ```
    pub fn ttl_fifo(ttl: Duration, max_size: usize) -> Self {
        Self {
            max_size: Some(max_size),
            ttl: Some(ttl),
            eviction_policy: EvictionPolicy::Fifo,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_headroom(mut self, headroom: usize) -> Self {
        self.trim_headroom = headroom;
        self
    }
}

/// Fluent builder for [`CacheConfig`]
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, size: usize) -> Self {
        self.config.max_size = Some(size);
        self
    }

    pub fn ttl(mut self, duration: Duration) -> Self {
        self.config.ttl = Some(duration);
        self
    }

    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.config.eviction_policy = policy;
        self
    }

    pub fn trim_headroom(mut self, headroom: usize) -> Self {
        self.config.trim_headroom = headroom;
        self
    }

    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    pub fn build(self) -> CacheConfig {
        self.config
    }
}
