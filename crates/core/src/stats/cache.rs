//! Process-local cache in front of the stats queries
//!
//! Two TTL maps, one for hotel-wide figures and one for per-technician
//! figures. Keys are typed so invalidation matches ids exactly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hotelix_common::cache::{Cache, CacheConfig, CacheStats};
use hotelix_domain::{
    CacheSettings, GlobalStats, InterventionCounts, Result, StatsFilters, TechnicianStats,
    TechnicianStatus,
};
use serde::Serialize;
use tracing::{debug, trace};

use super::service::{normalize_technician_period, SharedClock, StatsService};

/// Key of a cached [`GlobalStats`]; `period_days` of `None` covers the whole
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalStatsKey {
    pub hotel_id: i64,
    pub period_days: Option<u32>,
}

impl GlobalStatsKey {
    pub fn new(hotel_id: i64, period_days: Option<u32>) -> Self {
        Self { hotel_id, period_days: period_days.filter(|days| *days > 0) }
    }
}

/// Key of a cached [`TechnicianStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TechnicianStatsKey {
    pub technician_id: i64,
    pub period_days: u32,
}

impl TechnicianStatsKey {
    pub fn new(technician_id: i64, period_days: Option<u32>) -> Self {
        Self { technician_id, period_days: normalize_technician_period(period_days) }
    }
}

/// Combined view of both maps, served by the admin endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    pub global: CacheStats,
    pub technician: CacheStats,
    pub hit_rate: f64,
    pub miss_rate: f64,
    pub size: usize,
}

/// Both maps carry a generation counter bumped before every invalidation.
/// A read-through computed under an older generation must not outlive it.
pub struct InterventionCache {
    global: Cache<GlobalStatsKey, GlobalStats, SharedClock>,
    technician: Cache<TechnicianStatsKey, TechnicianStats, SharedClock>,
    global_generation: AtomicU64,
    technician_generation: AtomicU64,
}

impl InterventionCache {
    pub fn new(settings: &CacheSettings, clock: SharedClock) -> Self {
        let ttl = Duration::from_millis(settings.ttl_ms);
        let config =
            CacheConfig::ttl_fifo(ttl, settings.max_size).with_headroom(settings.trim_headroom);

        Self {
            global: Cache::with_clock(config.clone(), Arc::clone(&clock)),
            technician: Cache::with_clock(config, clock),
            global_generation: AtomicU64::new(0),
            technician_generation: AtomicU64::new(0),
        }
    }

    pub fn global_generation(&self) -> u64 {
        self.global_generation.load(Ordering::Acquire)
    }

    pub fn technician_generation(&self) -> u64 {
        self.technician_generation.load(Ordering::Acquire)
    }

    pub fn global(&self, key: &GlobalStatsKey) -> Option<GlobalStats> {
        self.global.get(key)
    }

    pub fn store_global(&self, key: GlobalStatsKey, stats: GlobalStats) {
        self.global.insert(key, stats);
    }

    /// Store `stats` computed while the global generation was `generation`.
    /// Returns `false`, leaving the key absent, if an invalidation ran since.
    pub fn store_global_if_current(
        &self,
        key: GlobalStatsKey,
        stats: GlobalStats,
        generation: u64,
    ) -> bool {
        if self.global_generation() != generation {
            return false;
        }
        self.global.insert(key, stats);
        // An invalidation racing the insert bumps first, so re-checking
        // catches it before the stale value can be served.
        if self.global_generation() != generation {
            self.global.remove(&key);
            return false;
        }
        true
    }

    pub fn technician(&self, key: &TechnicianStatsKey) -> Option<TechnicianStats> {
        self.technician.get(key)
    }

    pub fn store_technician(&self, key: TechnicianStatsKey, stats: TechnicianStats) {
        self.technician.insert(key, stats);
    }

    /// Technician counterpart of [`Self::store_global_if_current`].
    pub fn store_technician_if_current(
        &self,
        key: TechnicianStatsKey,
        stats: TechnicianStats,
        generation: u64,
    ) -> bool {
        if self.technician_generation() != generation {
            return false;
        }
        self.technician.insert(key, stats);
        if self.technician_generation() != generation {
            self.technician.remove(&key);
            return false;
        }
        true
    }

    /// Drop every global entry of `hotel_id`, whatever the period.
    pub fn invalidate_hotel_stats(&self, hotel_id: i64) -> usize {
        self.global_generation.fetch_add(1, Ordering::AcqRel);
        let removed = self.global.remove_where(|key| key.hotel_id == hotel_id);
        trace!(hotel_id, removed, "hotel stats invalidated");
        removed
    }

    pub fn invalidate_technician_stats(&self, technician_id: i64) -> usize {
        self.technician_generation.fetch_add(1, Ordering::AcqRel);
        let removed = self.technician.remove_where(|key| key.technician_id == technician_id);
        trace!(technician_id, removed, "technician stats invalidated");
        removed
    }

    /// Hotel plus every distinct technician in `technicians`.
    pub fn invalidate_for(&self, hotel_id: i64, technicians: &[Option<i64>]) {
        self.invalidate_hotel_stats(hotel_id);
        let mut seen: Vec<i64> = Vec::with_capacity(technicians.len());
        for id in technicians.iter().flatten() {
            if !seen.contains(id) {
                seen.push(*id);
                self.invalidate_technician_stats(*id);
            }
        }
    }

    pub fn invalidate_all(&self) {
        self.global_generation.fetch_add(1, Ordering::AcqRel);
        self.technician_generation.fetch_add(1, Ordering::AcqRel);
        self.global.clear();
        self.technician.clear();
        debug!("stats cache cleared");
    }

    /// Evict expired entries from both maps, returning how many went.
    pub fn cleanup_expired(&self) -> usize {
        self.global.cleanup_expired() + self.technician.cleanup_expired()
    }

    pub fn len(&self) -> usize {
        self.global.len() + self.technician.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn report(&self) -> CacheReport {
        let global = self.global.stats();
        let technician = self.technician.stats();
        let combined = global.combine(&technician);

        CacheReport {
            hit_rate: combined.hit_rate(),
            miss_rate: combined.miss_rate(),
            size: combined.size,
            global,
            technician,
        }
    }
}

/// Read-through front for [`StatsService`]
///
/// Global and technician figures are cached; counts and status are cheap
/// and always computed.
#[derive(Clone)]
pub struct CachedStatsService {
    stats: Arc<StatsService>,
    cache: Arc<InterventionCache>,
}

impl CachedStatsService {
    pub fn new(stats: Arc<StatsService>, cache: Arc<InterventionCache>) -> Self {
        Self { stats, cache }
    }

    pub fn cache(&self) -> &Arc<InterventionCache> {
        &self.cache
    }

    pub async fn global_stats(
        &self,
        hotel_id: i64,
        period_days: Option<u32>,
    ) -> Result<GlobalStats> {
        let key = GlobalStatsKey::new(hotel_id, period_days);
        if let Some(hit) = self.cache.global(&key) {
            trace!(hotel_id, ?period_days, "global stats served from cache");
            return Ok(hit);
        }

        let generation = self.cache.global_generation();
        let stats = self.stats.global_stats(key.hotel_id, key.period_days).await?;
        if !self.cache.store_global_if_current(key, stats.clone(), generation) {
            debug!(hotel_id, ?period_days, "global stats invalidated while computing");
        }
        Ok(stats)
    }

    pub async fn technician_stats(
        &self,
        technician_id: i64,
        period_days: Option<u32>,
    ) -> Result<TechnicianStats> {
        let key = TechnicianStatsKey::new(technician_id, period_days);
        if let Some(hit) = self.cache.technician(&key) {
            trace!(technician_id, days = key.period_days, "technician stats served from cache");
            return Ok(hit);
        }

        let generation = self.cache.technician_generation();
        let stats = self.stats.technician_stats(technician_id, Some(key.period_days)).await?;
        if !self.cache.store_technician_if_current(key, stats.clone(), generation) {
            debug!(technician_id, "technician stats invalidated while computing");
        }
        Ok(stats)
    }

    pub async fn intervention_counts(&self, filters: StatsFilters) -> Result<InterventionCounts> {
        self.stats.intervention_counts(filters).await
    }

    pub async fn technician_status(&self, technician_id: i64) -> Result<TechnicianStatus> {
        self.stats.technician_status(technician_id).await
    }
}
