//! Intervention workflows: reporting, status changes, assignment, edits

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hotelix_domain::{
    HotelixError, Intervention, InterventionFilter, InterventionForm, InterventionPatch,
    InterventionWithRelations, NewIntervention, Outcome, Result, Role, Statut, TechnicianOption,
    User, ZoneWithSousZones,
};
use tracing::{error, info};

use super::ports::{InterventionRepository, ZoneRepository};
use crate::auth::ports::UserRepository;
use crate::stats::{InterventionCache, SharedClock};

pub(crate) const NOT_FOUND: &str = "Intervention non trouvée";
pub(crate) const MANAGER_ONLY: &str = "Seul un manager peut assigner des interventions";
const USER_NOT_FOUND: &str = "Utilisateur non trouvé";
const FORBIDDEN_EDIT: &str = "Permission insuffisante pour modifier cette intervention";
const CLOSED_EDIT: &str = "Impossible de modifier une intervention terminée ou annulée";
const TECHNICIAN_INVALID: &str = "Technicien non trouvé ou rôle invalide";

/// Replace storage failures with a user-facing message; domain failures
/// (not found, conflicts) pass through.
pub(crate) fn storage_failure(
    operation: &'static str,
    message: &'static str,
) -> impl FnOnce(HotelixError) -> HotelixError {
    move |err| match err {
        HotelixError::Database(_) | HotelixError::Internal(_) => {
            error!(operation, error = %err, "intervention storage failure");
            HotelixError::Database(message.to_string())
        }
        other => other,
    }
}

/// Confirmation message naming the technician.
pub(crate) fn assigned_message(technician: &User) -> String {
    format!("Intervention assignée à {}", technician.display_name())
}

pub struct InterventionService {
    interventions: Arc<dyn InterventionRepository>,
    zones: Arc<dyn ZoneRepository>,
    users: Arc<dyn UserRepository>,
    cache: Arc<InterventionCache>,
    clock: SharedClock,
}

impl InterventionService {
    pub fn new(
        interventions: Arc<dyn InterventionRepository>,
        zones: Arc<dyn ZoneRepository>,
        users: Arc<dyn UserRepository>,
        cache: Arc<InterventionCache>,
        clock: SharedClock,
    ) -> Self {
        Self { interventions, zones, users, cache, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.clock.system_time())
    }

    /// Report a new issue. The ticket starts EN_ATTENTE.
    pub async fn create(
        &self,
        form: InterventionForm,
        demandeur_id: i64,
        hotel_id: i64,
    ) -> Result<Outcome<Intervention>> {
        if form.titre.trim().is_empty() {
            let mut fields = BTreeMap::new();
            fields.insert("titre".to_string(), "Le titre est requis".to_string());
            return Err(HotelixError::validation(fields));
        }

        let new = NewIntervention::from_form(form, demandeur_id, hotel_id, self.now());
        let created = self
            .interventions
            .create(new)
            .await
            .map_err(storage_failure("create", "Erreur lors de la création de l'intervention"))?;

        self.cache.invalidate_for(created.hotel_id, &[created.assigne_id]);
        info!(intervention_id = created.id, hotel_id, "intervention created");
        Ok(Outcome::new(created, "Intervention créée avec succès"))
    }

    /// Move a ticket to any status, stamping start and end dates.
    pub async fn update_statut(
        &self,
        id: i64,
        statut: Statut,
        user_id: i64,
    ) -> Result<Outcome<Intervention>> {
        const FAILURE: &str = "Erreur lors de la mise à jour du statut";

        let mut intervention = self.editable(id, user_id, FAILURE).await?;
        let previous_assignee = intervention.assigne_id;
        let now = self.now();

        intervention.statut = statut;
        if statut == Statut::EnCours && intervention.date_debut.is_none() {
            intervention.date_debut = Some(now);
        }
        intervention.date_fin = (statut == Statut::Terminee).then_some(now);

        let updated = self
            .interventions
            .update(&intervention)
            .await
            .map_err(storage_failure("update_statut", FAILURE))?;

        self.cache.invalidate_for(updated.hotel_id, &[previous_assignee, updated.assigne_id]);
        info!(intervention_id = id, statut = %statut, user_id, "intervention status updated");
        Ok(Outcome::new(updated, format!("Statut mis à jour: {statut}")))
    }

    /// Assign to a technician, or unassign when `technician_id` is 0. Either
    /// way the ticket goes back to EN_ATTENTE.
    pub async fn assign(
        &self,
        id: i64,
        technician_id: i64,
        manager_id: i64,
    ) -> Result<Outcome<Intervention>> {
        const FAILURE: &str = "Erreur lors de l'assignation";

        let manager =
            self.users.find_by_id(manager_id).await.map_err(storage_failure("assign", FAILURE))?;
        if !manager.as_ref().is_some_and(User::is_manager) {
            return Err(HotelixError::Forbidden(MANAGER_ONLY.to_string()));
        }

        let (technician, message) = if technician_id == 0 {
            (None, "Intervention désassignée".to_string())
        } else {
            let technician = self
                .users
                .find_by_id(technician_id)
                .await
                .map_err(storage_failure("assign", FAILURE))?
                .filter(User::is_technician)
                .ok_or_else(|| HotelixError::NotFound(TECHNICIAN_INVALID.to_string()))?;
            let message = assigned_message(&technician);
            (Some(technician), message)
        };

        let mut intervention = self
            .interventions
            .find_by_id(id)
            .await
            .map_err(storage_failure("assign", FAILURE))?
            .ok_or_else(|| HotelixError::NotFound(NOT_FOUND.to_string()))?;
        let previous_assignee = intervention.assigne_id;

        intervention.assigne_id = technician.as_ref().map(|t| t.id);
        intervention.statut = Statut::EnAttente;

        let updated = self
            .interventions
            .update(&intervention)
            .await
            .map_err(storage_failure("assign", FAILURE))?;

        self.cache.invalidate_for(updated.hotel_id, &[previous_assignee, updated.assigne_id]);
        info!(intervention_id = id, technician_id, manager_id, "intervention assignment changed");
        Ok(Outcome::new(updated, message))
    }

    /// Interventions visible to a user, newest first. Technicians only see
    /// their own.
    pub async fn list(
        &self,
        hotel_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<Vec<InterventionWithRelations>> {
        let mut filter = InterventionFilter::for_hotel(hotel_id);
        if role == Role::Technicien {
            filter.assigne_id = Some(user_id);
        }
        self.interventions.list_with_relations(filter).await
    }

    pub async fn zones(&self, hotel_id: i64) -> Result<Vec<ZoneWithSousZones>> {
        self.zones.list_with_sous_zones(hotel_id).await
    }

    /// Edit descriptive fields of an open ticket.
    pub async fn update(
        &self,
        id: i64,
        patch: InterventionPatch,
        user_id: i64,
    ) -> Result<Outcome<Intervention>> {
        const FAILURE: &str = "Erreur lors de la mise à jour de l'intervention";

        let mut intervention = self.editable(id, user_id, FAILURE).await?;
        if intervention.statut.is_closed() {
            return Err(HotelixError::InvalidInput(CLOSED_EDIT.to_string()));
        }

        patch.apply_to(&mut intervention)?;
        let updated = self
            .interventions
            .update(&intervention)
            .await
            .map_err(storage_failure("update", FAILURE))?;

        self.cache.invalidate_for(updated.hotel_id, &[updated.assigne_id]);
        info!(intervention_id = id, user_id, "intervention edited");
        Ok(Outcome::new(updated, "Intervention mise à jour avec succès"))
    }

    /// Assignee picker entries for a hotel.
    pub async fn technicians(&self, hotel_id: i64) -> Result<Vec<TechnicianOption>> {
        let technicians = self.users.list_technicians(hotel_id).await?;
        Ok(technicians
            .into_iter()
            .map(|user| TechnicianOption {
                id: user.id,
                name: user.name,
                email: user.email,
                specialite: user.specialite,
            })
            .collect())
    }

    /// Load a ticket and check that `user_id` may modify it: managers
    /// always, technicians only when assigned.
    async fn editable(
        &self,
        id: i64,
        user_id: i64,
        failure: &'static str,
    ) -> Result<Intervention> {
        let intervention = self
            .interventions
            .find_by_id(id)
            .await
            .map_err(storage_failure("load", failure))?
            .ok_or_else(|| HotelixError::NotFound(NOT_FOUND.to_string()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(storage_failure("load", failure))?
            .ok_or_else(|| HotelixError::NotFound(USER_NOT_FOUND.to_string()))?;

        let allowed = match user.role {
            Role::Manager => true,
            Role::Technicien => intervention.assigne_id == Some(user.id),
            Role::Staff => false,
        };
        if !allowed {
            return Err(HotelixError::Forbidden(FORBIDDEN_EDIT.to_string()));
        }

        Ok(intervention)
    }
}
