//! Shared test helpers for `hotelix-core` integration tests.
//!
//! [`Fixture`] wires every service onto one [`InMemoryStore`] and a
//! [`MockClock`] pinned to a fixed date, so tests only seed rows and call
//! services.

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};
use hotelix_common::crypto::PasswordHasher;
use hotelix_common::time::MockClock;
use hotelix_core::{
    AuthService, CacheManager, CachedStatsService, InterventionCache, InterventionService,
    SharedClock, StatsService, TechnicianService,
};
use hotelix_domain::CacheSettings;
pub use repositories::{intervention, InMemoryStore};

/// Services sharing a store, a clock and a stats cache.
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub clock: MockClock,
    pub cache: Arc<InterventionCache>,
    pub stats: CachedStatsService,
}

impl Fixture {
    /// Clock pinned to 2025-03-20 12:00:00 UTC.
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let wall = UNIX_EPOCH + Duration::from_millis(start.timestamp_millis() as u64);
        Self::starting_at(wall)
    }

    pub fn starting_at(wall: SystemTime) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = MockClock::starting_at(wall);
        let shared: SharedClock = Arc::new(clock.clone());
        let cache = Arc::new(InterventionCache::new(&CacheSettings::default(), shared.clone()));
        let stats = CachedStatsService::new(
            Arc::new(StatsService::new(store.clone(), shared)),
            cache.clone(),
        );
        Self { store, clock, cache, stats }
    }

    pub fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(hotelix_common::Clock::system_time(&self.clock))
    }

    pub fn shared_clock(&self) -> SharedClock {
        Arc::new(self.clock.clone())
    }

    pub fn interventions(&self) -> InterventionService {
        InterventionService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.cache.clone(),
            self.shared_clock(),
        )
    }

    pub fn technicians(&self) -> TechnicianService {
        TechnicianService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.stats.clone(),
        )
    }

    /// Auth service with a cheap argon2 cost.
    pub fn auth(&self) -> AuthService {
        AuthService::with_hasher(self.store.clone(), self.store.clone(), cheap_hasher())
    }

    pub fn cache_manager(&self) -> CacheManager {
        CacheManager::new(self.stats.clone())
    }
}

pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(64, 1).unwrap()
}
