//! Statistics payloads
//!
//! Produced by the stats service and served by the dashboard endpoints.
//! Durations are whole minutes and rates whole percentages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intervention::{Intervention, Statut, TypeIntervention};

/// Minimal projection of an intervention used by the aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterventionSnapshot {
    pub type_intervention: TypeIntervention,
    pub statut: Statut,
    pub date_creation: DateTime<Utc>,
    pub date_debut: Option<DateTime<Utc>>,
    pub date_fin: Option<DateTime<Utc>>,
}

impl From<&Intervention> for InterventionSnapshot {
    fn from(intervention: &Intervention) -> Self {
        Self {
            type_intervention: intervention.type_intervention,
            statut: intervention.statut,
            date_creation: intervention.date_creation,
            date_debut: intervention.date_debut,
            date_fin: intervention.date_fin,
        }
    }
}

/// Hotel-wide dashboard figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_interventions: u32,
    pub en_cours: u32,
    pub en_attente: u32,
    pub terminees: u32,
    pub annulees: u32,
    pub taux_reussite: u32,
    pub temps_moyen_resolution: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub type_intervention: TypeIntervention,
    pub count: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotals {
    pub en_cours: u32,
    pub terminees: u32,
    pub annulees: u32,
    pub en_attente: u32,
}

/// Per-technician dashboard figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianStats {
    pub interventions_par_jour: Vec<DailyCount>,
    pub temps_moyen_intervention: i64,
    pub taux_reussite: u32,
    pub repartition_par_type: Vec<TypeBreakdown>,
    pub totaux_mensuel: StatusTotals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionCounts {
    pub en_cours: u32,
    pub en_attente: u32,
    pub terminees: u32,
    pub annulees: u32,
    pub total: u32,
}

/// Filters for [`InterventionCounts`]. A non-zero `period_days` wins over
/// the explicit date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilters {
    pub hotel_id: i64,
    #[serde(default)]
    pub technicien_id: Option<i64>,
    #[serde(default)]
    pub period_days: Option<u32>,
    #[serde(default)]
    pub date_debut: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_fin: Option<DateTime<Utc>>,
}

/// Selectable dashboard window; `days == 0` means the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsPeriod {
    pub label: &'static str,
    pub days: u32,
    pub key: &'static str,
}

impl StatsPeriod {
    /// Window as an optional day count.
    pub const fn period_days(&self) -> Option<u32> {
        if self.days == 0 {
            None
        } else {
            Some(self.days)
        }
    }
}

pub const STATS_PERIODS: [StatsPeriod; 4] = [
    StatsPeriod { label: "7 derniers jours", days: 7, key: "7d" },
    StatsPeriod { label: "30 derniers jours", days: 30, key: "30d" },
    StatsPeriod { label: "90 derniers jours", days: 90, key: "90d" },
    StatsPeriod { label: "Toute la période", days: 0, key: "all" },
];
