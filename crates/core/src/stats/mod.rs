//! Dashboard statistics and their cache

pub mod admin;
pub mod cache;
pub mod compute;
pub mod service;

pub use admin::CacheManager;
pub use cache::{
    CacheReport, CachedStatsService, GlobalStatsKey, InterventionCache, TechnicianStatsKey,
};
pub use service::{SharedClock, StatsService};
