//! Technician views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hotel::Hotel;
use super::intervention::InterventionWithRelations;
use super::user::Role;
use crate::impl_domain_status_conversions;

/// Availability derived from the current workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechnicianStatus {
    Disponible,
    Occupe,
    HorsLigne,
}

impl_domain_status_conversions!(TechnicianStatus {
    Disponible => "DISPONIBLE",
    Occupe => "OCCUPE",
    HorsLigne => "HORS_LIGNE",
});

/// Entry of the assignee picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianOption {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub specialite: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianListItem {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub specialite: Option<String>,
    pub interventions_en_cours: u32,
    pub interventions_total: u32,
    pub dernier_activite: Option<DateTime<Utc>>,
    pub statut: TechnicianStatus,
}

/// Technician profile with every intervention assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianDetails {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub specialite: Option<String>,
    pub created_at: DateTime<Utc>,
    pub hotel: Hotel,
    pub interventions_assignees: Vec<InterventionWithRelations>,
    pub total_assignees: u32,
}

/// List filter; `ALL` (or an absent value) disables a criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub specialite: Option<String>,
    #[serde(default)]
    pub statut: Option<String>,
}

impl TechnicianFilter {
    pub fn matches(&self, item: &TechnicianListItem) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                item.email.to_lowercase().contains(&term)
                    || item.name.as_deref().is_some_and(|name| name.to_lowercase().contains(&term))
            }
            _ => true,
        };

        let specialite_ok = match active(self.specialite.as_deref()) {
            Some(wanted) => item
                .specialite
                .as_deref()
                .is_some_and(|specialite| specialite.eq_ignore_ascii_case(wanted)),
            None => true,
        };

        let statut_ok = match active(self.statut.as_deref()) {
            Some(wanted) => item.statut.as_str().eq_ignore_ascii_case(wanted),
            None => true,
        };

        search_ok && specialite_ok && statut_ok
    }
}

fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("ALL"))
}
