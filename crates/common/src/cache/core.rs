//! Thread-safe TTL cache with batch trimming

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use super::config::{CacheConfig, EvictionPolicy};
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheStorage<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Eviction order, front goes first
    order: Vec<K>,
}

impl<K, V> CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self { entries: HashMap::new(), order: Vec::new() }
    }

    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        self.order.retain(|k| k != key);
        self.entries.remove(key)
    }

    fn touch(&mut self, key: &K) {
        self.order.retain(|k| k != key);
        self.order.push(key.clone());
    }
}

/// Generic thread-safe cache
///
/// Clones share storage and metrics. Expired entries are dropped lazily on
/// lookup or eagerly by [`Cache::cleanup_expired`].
///
/// ```
/// use hotelix_common::cache::{Cache, CacheConfig};
///
/// let cache: Cache<&str, u32> = Cache::new(CacheConfig::lru(2));
/// cache.insert("a", 1);
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
pub struct Cache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<CacheStorage<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Insert or replace a value, restarting its TTL.
    ///
    /// When the insert pushes the cache past `max_size`, the overflow plus
    /// `trim_headroom` entries are evicted in policy order. The entry just
    /// inserted is never part of the batch.
    pub fn insert(&self, key: K, value: V) {
        let mut storage = self.storage.write();
        let entry = CacheEntry { value, inserted_at: self.clock.now() };

        storage.entries.insert(key.clone(), entry);
        storage.touch(&key);

        if self.config.track_metrics {
            self.metrics.record_insert();
        }

        self.trim(&mut storage);
    }

    /// Look a key up. Expired entries are removed and count as misses.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write();
        let now = self.clock.now();

        let Some(entry) = storage.entries.get(key) else {
            self.record_miss();
            return None;
        };

        if self.is_expired(entry, now) {
            storage.remove(key);
            self.record_miss();
            if self.config.track_metrics {
                self.metrics.record_expirations(1);
            }
            return None;
        }

        let value = entry.value.clone();
        if self.config.eviction_policy == EvictionPolicy::Lru {
            storage.touch(key);
        }
        if self.config.track_metrics {
            self.metrics.record_hit();
        }
        Some(value)
    }

    /// Return the cached value or compute, store and return a fresh one.
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = f();
        self.insert(key, value.clone());
        value
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.storage.write().remove(key).map(|entry| entry.value)
    }

    /// Remove every entry whose key matches `predicate`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let mut storage = self.storage.write();
        let before = storage.entries.len();

        storage.entries.retain(|key, _| !predicate(key));
        let CacheStorage { entries, order } = &mut *storage;
        order.retain(|key| entries.contains_key(key));

        before - storage.entries.len()
    }

    /// Drop every entry. Hit, miss and eviction counters are kept.
    pub fn clear(&self) {
        let mut storage = self.storage.write();
        storage.entries.clear();
        storage.order.clear();
    }

    /// Zero the hit, miss, insert, eviction and expiration counters.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    pub fn len(&self) -> usize {
        self.storage.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.storage.read().entries.contains_key(key)
    }

    /// Remove expired entries. Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        if self.config.ttl.is_none() {
            return 0;
        }

        let now = self.clock.now();
        let mut storage = self.storage.write();
        let before = storage.entries.len();

        storage.entries.retain(|_, entry| !self.is_expired(entry, now));
        let CacheStorage { entries, order } = &mut *storage;
        order.retain(|key| entries.contains_key(key));

        let removed = before - storage.entries.len();
        if self.config.track_metrics && removed > 0 {
            self.metrics.record_expirations(removed as u64);
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.max_size)
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        self.config.ttl.is_some_and(|ttl| now.saturating_duration_since(entry.inserted_at) > ttl)
    }

    fn record_miss(&self) {
        if self.config.track_metrics {
            self.metrics.record_miss();
        }
    }

    fn trim(&self, storage: &mut CacheStorage<K, V>) {
        let Some(max_size) = self.config.max_size else {
            return;
        };
        if self.config.eviction_policy == EvictionPolicy::None {
            return;
        }

        let len = storage.entries.len();
        if len <= max_size {
            return;
        }

        let batch = (len - max_size + self.config.trim_headroom).min(len.saturating_sub(1));
        let victims: Vec<K> = storage.order.drain(..batch).collect();
        for key in &victims {
            storage.entries.remove(key);
        }

        if self.config.track_metrics {
            self.metrics.record_evictions(victims.len() as u64);
        }
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}
