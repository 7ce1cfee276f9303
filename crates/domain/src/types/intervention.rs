//! Intervention (maintenance ticket) types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::user::Role;
use super::zone::TypeZone;
use crate::errors::HotelixError;
use crate::impl_domain_status_conversions;

/// Ticket lifecycle label. Transitions are not restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Statut {
    #[default]
    EnAttente,
    EnCours,
    Terminee,
    Annulee,
}

impl_domain_status_conversions!(Statut {
    EnAttente => "EN_ATTENTE",
    EnCours => "EN_COURS",
    Terminee => "TERMINEE",
    Annulee => "ANNULEE",
});

impl Statut {
    /// Closed tickets can no longer be edited.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Terminee | Self::Annulee)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeIntervention {
    Plomberie,
    Electricite,
    Climatisation,
    Chauffage,
    Menuiserie,
    Peinture,
    Nettoyage,
    Menage,
    Autre,
}

impl_domain_status_conversions!(TypeIntervention {
    Plomberie => "PLOMBERIE",
    Electricite => "ELECTRICITE",
    Climatisation => "CLIMATISATION",
    Chauffage => "CHAUFFAGE",
    Menuiserie => "MENUISERIE",
    Peinture => "PEINTURE",
    Nettoyage => "NETTOYAGE",
    Menage => "MENAGE",
    Autre => "AUTRE",
});

/// Priority, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priorite {
    Basse,
    #[default]
    Normale,
    Haute,
    Urgente,
}

impl_domain_status_conversions!(Priorite {
    Basse => "BASSE",
    Normale => "NORMALE",
    Haute => "HAUTE",
    Urgente => "URGENTE",
});

impl Priorite {
    /// Numeric rank used for ordering in storage queries.
    pub const fn rank(self) -> i64 {
        match self {
            Self::Basse => 0,
            Self::Normale => 1,
            Self::Haute => 2,
            Self::Urgente => 3,
        }
    }
}

/// Who reported the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origine {
    #[default]
    Staff,
    Client,
}

impl_domain_status_conversions!(Origine {
    Staff => "STAFF",
    Client => "CLIENT",
});

/// Persisted intervention row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: i64,
    pub titre: String,
    pub description: Option<String>,
    pub statut: Statut,
    #[serde(rename = "type")]
    pub type_intervention: TypeIntervention,
    pub priorite: Priorite,
    pub origine: Origine,
    pub date_creation: DateTime<Utc>,
    pub date_debut: Option<DateTime<Utc>>,
    pub date_fin: Option<DateTime<Utc>>,
    pub hotel_id: i64,
    pub demandeur_id: i64,
    pub assigne_id: Option<i64>,
    pub zone_id: i64,
    pub sous_zone_id: Option<i64>,
}

/// Fields supplied when reporting a new intervention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionForm {
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_intervention: TypeIntervention,
    #[serde(default)]
    pub priorite: Priorite,
    #[serde(default)]
    pub origine: Origine,
    pub zone_id: i64,
    #[serde(default)]
    pub sous_zone_id: Option<i64>,
    #[serde(default)]
    pub assigne_id: Option<i64>,
}

/// Insert payload for the intervention repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIntervention {
    pub titre: String,
    pub description: Option<String>,
    pub statut: Statut,
    pub type_intervention: TypeIntervention,
    pub priorite: Priorite,
    pub origine: Origine,
    pub date_creation: DateTime<Utc>,
    pub hotel_id: i64,
    pub demandeur_id: i64,
    pub assigne_id: Option<i64>,
    pub zone_id: i64,
    pub sous_zone_id: Option<i64>,
}

impl NewIntervention {
    /// Fresh EN_ATTENTE ticket reported by `demandeur_id` at `now`.
    pub fn from_form(
        form: InterventionForm,
        demandeur_id: i64,
        hotel_id: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            titre: form.titre.trim().to_string(),
            description: form.description.filter(|d| !d.trim().is_empty()),
            statut: Statut::EnAttente,
            type_intervention: form.type_intervention,
            priorite: form.priorite,
            origine: form.origine,
            date_creation: now,
            hotel_id,
            demandeur_id,
            assigne_id: form.assigne_id,
            zone_id: form.zone_id,
            sous_zone_id: form.sous_zone_id,
        }
    }
}

/// Partial edit; `None` leaves the stored value unchanged. The nullable
/// columns take `Some(None)` (an explicit JSON `null`) to clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionPatch {
    #[serde(default)]
    pub titre: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "type")]
    pub type_intervention: Option<TypeIntervention>,
    #[serde(default)]
    pub priorite: Option<Priorite>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub sous_zone_id: Option<Option<i64>>,
}

/// Tell a `null` field apart from a missing one: missing falls back to the
/// `default` of `None`, `null` becomes `Some(None)`.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl InterventionPatch {
    /// Apply the patch onto a stored row. A blank title is rejected before
    /// anything is written.
    pub fn apply_to(&self, intervention: &mut Intervention) -> crate::Result<()> {
        let titre = match &self.titre {
            Some(titre) if titre.trim().is_empty() => {
                let mut fields = BTreeMap::new();
                fields.insert("titre".to_string(), "Le titre est requis".to_string());
                return Err(HotelixError::validation(fields));
            }
            Some(titre) => Some(titre.trim()),
            None => None,
        };

        if let Some(titre) = titre {
            intervention.titre = titre.to_string();
        }
        if let Some(description) = &self.description {
            intervention.description =
                description.as_ref().filter(|d| !d.trim().is_empty()).cloned();
        }
        if let Some(kind) = self.type_intervention {
            intervention.type_intervention = kind;
        }
        if let Some(priorite) = self.priorite {
            intervention.priorite = priorite;
        }
        if let Some(zone_id) = self.zone_id {
            intervention.zone_id = zone_id;
        }
        if let Some(sous_zone_id) = self.sous_zone_id {
            intervention.sous_zone_id = sous_zone_id;
        }
        Ok(())
    }
}

/// Row filter used by list and stats queries. Date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterventionFilter {
    pub hotel_id: Option<i64>,
    pub assigne_id: Option<i64>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl InterventionFilter {
    pub fn for_hotel(hotel_id: i64) -> Self {
        Self { hotel_id: Some(hotel_id), ..Self::default() }
    }

    pub fn for_assignee(technician_id: i64) -> Self {
        Self { assigne_id: Some(technician_id), ..Self::default() }
    }

    pub fn created_since(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    /// Whether an intervention passes every bound of this filter.
    pub fn matches(&self, intervention: &Intervention) -> bool {
        self.hotel_id.map_or(true, |id| intervention.hotel_id == id)
            && self.assigne_id.map_or(true, |id| intervention.assigne_id == Some(id))
            && self.created_from.map_or(true, |from| intervention.date_creation >= from)
            && self.created_to.map_or(true, |to| intervention.date_creation <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandeurRef {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneRef {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub specialite: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRef {
    pub id: i64,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_zone: TypeZone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SousZoneRef {
    pub id: i64,
    pub nom: String,
}

/// Intervention joined with requester, assignee and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionWithRelations {
    #[serde(flatten)]
    pub intervention: Intervention,
    pub demandeur: DemandeurRef,
    pub assigne: Option<AssigneRef>,
    pub zone: ZoneRef,
    pub sous_zone: Option<SousZoneRef>,
}
