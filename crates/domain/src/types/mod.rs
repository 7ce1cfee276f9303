//! Domain types and models

pub mod hotel;
pub mod intervention;
pub mod stats;
pub mod technician;
pub mod user;
pub mod zone;

use serde::{Deserialize, Serialize};

pub use hotel::Hotel;
pub use intervention::{
    AssigneRef, DemandeurRef, Intervention, InterventionFilter, InterventionForm,
    InterventionPatch, InterventionWithRelations, NewIntervention, Origine, Priorite,
    SousZoneRef, Statut, TypeIntervention, ZoneRef,
};
pub use stats::{
    DailyCount, GlobalStats, InterventionCounts, InterventionSnapshot, StatsFilters, StatsPeriod,
    StatusTotals, TechnicianStats, TypeBreakdown, STATS_PERIODS,
};
pub use technician::{
    TechnicianDetails, TechnicianFilter, TechnicianListItem, TechnicianOption, TechnicianStatus,
};
pub use user::{LoginRequest, NewUser, RegisterRequest, Role, User, UserSession};
pub use zone::{SousZone, TypeZone, Zone, ZoneWithSousZones};

/// Successful result of a mutating operation, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub data: T,
    pub message: String,
}

impl<T> Outcome<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self { data, message: message.into() }
    }
}
