//! Stats queries over the intervention repository

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use hotelix_common::time::Clock;
use hotelix_domain::constants::DEFAULT_TECHNICIAN_PERIOD_DAYS;
use hotelix_domain::{
    GlobalStats, InterventionCounts, InterventionFilter, Result, StatsFilters, Statut,
    TechnicianStats, TechnicianStatus,
};
use tracing::debug;

use super::compute;
use crate::interventions::ports::InterventionRepository;

/// Clock shared by every service that stamps or windows by time
pub type SharedClock = Arc<dyn Clock>;

/// Uncached stats computations
pub struct StatsService {
    interventions: Arc<dyn InterventionRepository>,
    clock: SharedClock,
}

impl StatsService {
    pub fn new(interventions: Arc<dyn InterventionRepository>, clock: SharedClock) -> Self {
        Self { interventions, clock }
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.clock.system_time())
    }

    /// Hotel-wide figures, optionally restricted to the last `period_days`.
    pub async fn global_stats(
        &self,
        hotel_id: i64,
        period_days: Option<u32>,
    ) -> Result<GlobalStats> {
        let mut filter = InterventionFilter::for_hotel(hotel_id);
        filter.created_from = compute::window_start(self.now(), period_days);

        let snapshots = self.interventions.snapshots(filter).await?;
        debug!(hotel_id, rows = snapshots.len(), "computing global stats");
        Ok(compute::global_stats(&snapshots))
    }

    /// Figures for one technician over the last `period_days` (30 when absent
    /// or zero).
    pub async fn technician_stats(
        &self,
        technician_id: i64,
        period_days: Option<u32>,
    ) -> Result<TechnicianStats> {
        let days = normalize_technician_period(period_days);
        let now = self.now();
        let filter = InterventionFilter::for_assignee(technician_id)
            .created_since(now - Duration::days(i64::from(days)));

        let snapshots = self.interventions.snapshots(filter).await?;
        debug!(technician_id, days, rows = snapshots.len(), "computing technician stats");
        Ok(compute::technician_stats(&snapshots, now))
    }

    pub async fn intervention_counts(&self, filters: StatsFilters) -> Result<InterventionCounts> {
        let mut filter = InterventionFilter::for_hotel(filters.hotel_id);
        filter.assigne_id = filters.technicien_id;

        match compute::window_start(self.now(), filters.period_days) {
            Some(from) => filter.created_from = Some(from),
            None => {
                filter.created_from = filters.date_debut;
                filter.created_to = filters.date_fin;
            }
        }

        let snapshots = self.interventions.snapshots(filter).await?;
        Ok(compute::intervention_counts(&snapshots))
    }

    /// Availability from EN_COURS interventions assigned in any hotel.
    pub async fn technician_status(&self, technician_id: i64) -> Result<TechnicianStatus> {
        let snapshots =
            self.interventions.snapshots(InterventionFilter::for_assignee(technician_id)).await?;
        let running = snapshots.iter().filter(|s| s.statut == Statut::EnCours).count();
        Ok(compute::technician_status(u32::try_from(running).unwrap_or(u32::MAX)))
    }
}

/// `None` and `Some(0)` fall back to the default technician window.
pub fn normalize_technician_period(period_days: Option<u32>) -> u32 {
    period_days.filter(|days| *days > 0).unwrap_or(DEFAULT_TECHNICIAN_PERIOD_DAYS)
}
