//! Application context - dependency injection container

use std::sync::Arc;

use hotelix_common::crypto::PasswordHasher;
use hotelix_common::time::SystemClock;
use hotelix_core::{
    AuthService, CacheManager, CachedStatsService, HotelRepository, InterventionCache,
    InterventionRepository, InterventionService, SharedClock, StatsService, TechnicianService,
    UserRepository, ZoneRepository,
};
use hotelix_domain::{Config, Result};
use hotelix_infra::{
    DbManager, SqliteHotelRepository, SqliteInterventionRepository, SqliteUserRepository,
    SqliteZoneRepository,
};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub auth: AuthService,
    pub interventions: InterventionService,
    pub technicians: TechnicianService,
    pub stats: CachedStatsService,
    pub cache_manager: CacheManager,
}

impl AppContext {
    /// Open the configured database and wire every service on top of it.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::from_config(&config.database)?);
        Ok(Self::from_parts(config, db, Arc::new(SystemClock), PasswordHasher::default()))
    }

    /// Wire the services over an already migrated database.
    pub fn from_parts(
        config: Config,
        db: Arc<DbManager>,
        clock: SharedClock,
        hasher: PasswordHasher,
    ) -> Self {
        let hotels: Arc<dyn HotelRepository> =
            Arc::new(SqliteHotelRepository::new(Arc::clone(&db)));
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let zones: Arc<dyn ZoneRepository> = Arc::new(SqliteZoneRepository::new(Arc::clone(&db)));
        let interventions: Arc<dyn InterventionRepository> =
            Arc::new(SqliteInterventionRepository::new(Arc::clone(&db)));

        let cache = Arc::new(InterventionCache::new(&config.cache, Arc::clone(&clock)));
        let stats_service =
            Arc::new(StatsService::new(Arc::clone(&interventions), Arc::clone(&clock)));
        let stats = CachedStatsService::new(stats_service, Arc::clone(&cache));

        let auth = AuthService::with_hasher(Arc::clone(&users), Arc::clone(&hotels), hasher);
        let intervention_service = InterventionService::new(
            Arc::clone(&interventions),
            zones,
            Arc::clone(&users),
            cache,
            clock,
        );
        let technicians = TechnicianService::new(users, hotels, interventions, stats.clone());
        let cache_manager = CacheManager::new(stats.clone());

        info!(
            db_path = %db.path().display(),
            cache_ttl_ms = config.cache.ttl_ms,
            cache_max_size = config.cache.max_size,
            "application context initialised"
        );

        Self {
            config,
            db,
            auth,
            interventions: intervention_service,
            technicians,
            stats,
            cache_manager,
        }
    }
}
