//! Port interfaces for interventions and hotel zones

use async_trait::async_trait;
use hotelix_domain::{
    Intervention, InterventionFilter, InterventionSnapshot, InterventionWithRelations,
    NewIntervention, Result, SousZone, TypeZone, Zone, ZoneWithSousZones,
};

/// Intervention persistence and queries
#[async_trait]
pub trait InterventionRepository: Send + Sync {
    async fn create(&self, intervention: NewIntervention) -> Result<Intervention>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Intervention>>;

    /// Rows matching `filter`, newest first
    async fn list_with_relations(
        &self,
        filter: InterventionFilter,
    ) -> Result<Vec<InterventionWithRelations>>;

    /// Unassigned EN_ATTENTE or EN_COURS rows of a hotel, most urgent first
    /// then oldest first
    async fn list_available(&self, hotel_id: i64) -> Result<Vec<InterventionWithRelations>>;

    /// Persist every mutable column of an existing row
    async fn update(&self, intervention: &Intervention) -> Result<Intervention>;

    /// Stats projection of the rows matching `filter`, oldest first
    async fn snapshots(&self, filter: InterventionFilter) -> Result<Vec<InterventionSnapshot>>;
}

/// Zone and sous-zone persistence
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Zones of a hotel with their sous-zones, both ordered by name
    async fn list_with_sous_zones(&self, hotel_id: i64) -> Result<Vec<ZoneWithSousZones>>;

    async fn create_zone(&self, hotel_id: i64, nom: &str, type_zone: TypeZone) -> Result<Zone>;

    async fn create_sous_zone(&self, zone_id: i64, nom: &str) -> Result<SousZone>;

    /// Fails with `Conflict` while sous-zones still reference the zone
    async fn delete_zone(&self, zone_id: i64) -> Result<()>;
}
