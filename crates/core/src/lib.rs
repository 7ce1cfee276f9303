//! # Hotelix Core
//!
//! Business logic layer: port traits and the services built on them.
//!
//! This crate contains:
//! - Port interfaces implemented by `hotelix-infra`
//! - Auth, intervention and technician workflows
//! - Stats aggregation with its read-through cache
//!
//! ## Architecture Principles
//! - Depends only on `hotelix-domain` and `hotelix-common`
//! - No database or HTTP code
//! - Time comes from an injected clock

pub mod auth;
pub mod interventions;
pub mod stats;
pub mod technicians;

pub use auth::ports::{HotelRepository, UserRepository};
pub use auth::AuthService;
pub use interventions::ports::{InterventionRepository, ZoneRepository};
pub use interventions::InterventionService;
pub use stats::{
    CacheManager, CacheReport, CachedStatsService, GlobalStatsKey, InterventionCache,
    SharedClock, StatsService, TechnicianStatsKey,
};
pub use technicians::TechnicianService;
