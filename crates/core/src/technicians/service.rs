//! Technician directory, workload and self-service assignment

use std::sync::Arc;

use hotelix_domain::{
    HotelixError, Intervention, InterventionFilter, InterventionWithRelations, Outcome, Result,
    Statut, StatsFilters, TechnicianDetails, TechnicianFilter, TechnicianListItem,
    TechnicianStats, User,
};
use tracing::{debug, info, warn};

use crate::auth::ports::{HotelRepository, UserRepository};
use crate::interventions::ports::InterventionRepository;
use crate::interventions::service::{assigned_message, storage_failure, MANAGER_ONLY, NOT_FOUND};
use crate::stats::CachedStatsService;

const ASSIGN_FAILURE: &str = "Erreur lors de l'assignation";

pub struct TechnicianService {
    users: Arc<dyn UserRepository>,
    hotels: Arc<dyn HotelRepository>,
    interventions: Arc<dyn InterventionRepository>,
    stats: CachedStatsService,
}

impl TechnicianService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hotels: Arc<dyn HotelRepository>,
        interventions: Arc<dyn InterventionRepository>,
        stats: CachedStatsService,
    ) -> Self {
        Self { users, hotels, interventions, stats }
    }

    /// Technicians of a hotel with their current workload, ordered by name.
    pub async fn list(
        &self,
        hotel_id: i64,
        filter: Option<&TechnicianFilter>,
    ) -> Result<Vec<TechnicianListItem>> {
        let technicians = self.users.list_technicians(hotel_id).await?;
        let mut items = Vec::with_capacity(technicians.len());

        for technician in technicians {
            let item = self.list_item(hotel_id, technician).await?;
            if filter.map_or(true, |f| f.matches(&item)) {
                items.push(item);
            }
        }

        debug!(hotel_id, count = items.len(), "technicians listed");
        Ok(items)
    }

    async fn list_item(&self, hotel_id: i64, technician: User) -> Result<TechnicianListItem> {
        let counts = self
            .stats
            .intervention_counts(StatsFilters {
                hotel_id,
                technicien_id: Some(technician.id),
                ..StatsFilters::default()
            })
            .await?;
        let statut = self.stats.technician_status(technician.id).await?;
        let dernier_activite = self
            .interventions
            .snapshots(InterventionFilter::for_assignee(technician.id))
            .await?
            .iter()
            .map(|s| s.date_creation)
            .max();

        Ok(TechnicianListItem {
            id: technician.id,
            email: technician.email,
            name: technician.name,
            specialite: technician.specialite,
            interventions_en_cours: counts.en_cours,
            interventions_total: counts.total,
            dernier_activite,
            statut,
        })
    }

    /// Profile of a technician working in the same hotel as
    /// `current_user_id`. `None` when either side does not qualify.
    pub async fn get_by_id(
        &self,
        technician_id: i64,
        current_user_id: i64,
    ) -> Result<Option<TechnicianDetails>> {
        let Some(current) = self.users.find_by_id(current_user_id).await? else {
            return Ok(None);
        };
        let Some(technician) = self
            .users
            .find_by_id(technician_id)
            .await?
            .filter(|user| user.is_technician() && user.hotel_id == current.hotel_id)
        else {
            return Ok(None);
        };
        let Some(hotel) = self.hotels.find_by_id(technician.hotel_id).await? else {
            warn!(technician_id, hotel_id = technician.hotel_id, "technician hotel missing");
            return Ok(None);
        };

        let interventions = self
            .interventions
            .list_with_relations(InterventionFilter::for_assignee(technician.id))
            .await?;

        Ok(Some(TechnicianDetails {
            id: technician.id,
            email: technician.email,
            name: technician.name,
            role: technician.role,
            specialite: technician.specialite,
            created_at: technician.created_at,
            hotel,
            total_assignees: u32::try_from(interventions.len()).unwrap_or(u32::MAX),
            interventions_assignees: interventions,
        }))
    }

    pub async fn stats(
        &self,
        technician_id: i64,
        period_days: Option<u32>,
    ) -> Result<TechnicianStats> {
        self.stats.technician_stats(technician_id, period_days).await
    }

    /// Unassigned open tickets, most urgent first.
    pub async fn available_interventions(
        &self,
        hotel_id: i64,
    ) -> Result<Vec<InterventionWithRelations>> {
        self.interventions.list_available(hotel_id).await
    }

    /// Hand an unassigned ticket to a technician of the manager's hotel.
    pub async fn assign_to_technician(
        &self,
        intervention_id: i64,
        technician_id: i64,
        assigned_by: i64,
    ) -> Result<Outcome<Intervention>> {
        let manager = self
            .users
            .find_by_id(assigned_by)
            .await
            .map_err(storage_failure("assign_to_technician", ASSIGN_FAILURE))?
            .filter(User::is_manager)
            .ok_or_else(|| HotelixError::Forbidden(MANAGER_ONLY.to_string()))?;

        let mut intervention = self
            .interventions
            .find_by_id(intervention_id)
            .await
            .map_err(storage_failure("assign_to_technician", ASSIGN_FAILURE))?
            .ok_or_else(|| HotelixError::NotFound(NOT_FOUND.to_string()))?;
        if intervention.assigne_id.is_some() {
            return Err(HotelixError::Conflict("Intervention déjà assignée".to_string()));
        }

        let technician = self
            .users
            .find_by_id(technician_id)
            .await
            .map_err(storage_failure("assign_to_technician", ASSIGN_FAILURE))?
            .filter(|user| user.is_technician() && user.hotel_id == manager.hotel_id)
            .ok_or_else(|| HotelixError::NotFound("Technicien non trouvé".to_string()))?;

        intervention.assigne_id = Some(technician.id);
        intervention.statut = Statut::EnAttente;
        let updated = self
            .interventions
            .update(&intervention)
            .await
            .map_err(storage_failure("assign_to_technician", ASSIGN_FAILURE))?;

        self.stats.cache().invalidate_for(updated.hotel_id, &[updated.assigne_id]);
        info!(intervention_id, technician_id, assigned_by, "intervention taken by technician");
        Ok(Outcome::new(updated, assigned_message(&technician)))
    }
}
