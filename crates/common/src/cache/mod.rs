//! Generic in-memory cache
//!
//! A thread-safe map with optional TTL expiration and a bounded size. When a
//! bounded cache overflows it evicts in batches (overflow plus a configurable
//! headroom) following a FIFO or LRU order. Time is read through
//! [`crate::time::Clock`] so expiration can be driven by a `MockClock` in
//! tests.
//!
//! ```
//! use std::time::Duration;
//!
//! use hotelix_common::cache::{Cache, CacheConfig};
//!
//! let config = CacheConfig::ttl_fifo(Duration::from_secs(60), 100).with_headroom(10);
//! let cache: Cache<u64, String> = Cache::new(config);
//!
//! cache.insert(1, "stats".to_string());
//! cache.remove_where(|key| *key == 1);
//! assert!(cache.is_empty());
//! ```

pub mod config;
pub mod core;
pub mod stats;

pub use config::{CacheConfig, CacheConfigBuilder, EvictionPolicy};
pub use core::Cache;
pub use stats::CacheStats;
