//! Pure aggregation over intervention snapshots
//!
//! Callers filter rows (hotel, assignee, creation window) before handing
//! them over; these functions only count, average and bucket.

use chrono::{DateTime, Duration, Utc};
use hotelix_domain::constants::{BUSY_THRESHOLD, DAILY_BUCKETS};
use hotelix_domain::{
    DailyCount, GlobalStats, InterventionCounts, InterventionSnapshot, Statut, StatusTotals,
    TechnicianStats, TechnicianStatus, TypeBreakdown,
};

/// `round(part / total * 100)`, 0 when `total` is 0.
pub fn round_percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = (f64::from(part) / f64::from(total)) * 100.0;
    percent.round() as u32
}

/// Rounded mean of `date_fin - date_debut` in minutes over closed
/// (TERMINEE) rows carrying both dates; 0 when none qualify.
pub fn mean_resolution_minutes(snapshots: &[InterventionSnapshot]) -> i64 {
    let durations: Vec<i64> = snapshots
        .iter()
        .filter(|s| s.statut == Statut::Terminee)
        .filter_map(|s| match (s.date_debut, s.date_fin) {
            (Some(debut), Some(fin)) => Some((fin - debut).num_milliseconds()),
            _ => None,
        })
        .collect();

    if durations.is_empty() {
        return 0;
    }

    let mean_ms = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
    (mean_ms / 60_000.0).round() as i64
}

/// Start of a `days`-long window ending at `now`. `None` and `Some(0)` mean
/// no lower bound.
pub fn window_start(now: DateTime<Utc>, period_days: Option<u32>) -> Option<DateTime<Utc>> {
    period_days.filter(|days| *days > 0).map(|days| now - Duration::days(i64::from(days)))
}

pub fn status_totals(snapshots: &[InterventionSnapshot]) -> StatusTotals {
    snapshots.iter().fold(StatusTotals::default(), |mut totals, s| {
        match s.statut {
            Statut::EnCours => totals.en_cours += 1,
            Statut::Terminee => totals.terminees += 1,
            Statut::Annulee => totals.annulees += 1,
            Statut::EnAttente => totals.en_attente += 1,
        }
        totals
    })
}

fn total(snapshots: &[InterventionSnapshot]) -> u32 {
    u32::try_from(snapshots.len()).unwrap_or(u32::MAX)
}

pub fn global_stats(snapshots: &[InterventionSnapshot]) -> GlobalStats {
    let totals = status_totals(snapshots);
    let total = total(snapshots);

    GlobalStats {
        total_interventions: total,
        en_cours: totals.en_cours,
        en_attente: totals.en_attente,
        terminees: totals.terminees,
        annulees: totals.annulees,
        taux_reussite: round_percent(totals.terminees, total),
        temps_moyen_resolution: mean_resolution_minutes(snapshots),
    }
}

pub fn intervention_counts(snapshots: &[InterventionSnapshot]) -> InterventionCounts {
    let totals = status_totals(snapshots);
    InterventionCounts {
        en_cours: totals.en_cours,
        en_attente: totals.en_attente,
        terminees: totals.terminees,
        annulees: totals.annulees,
        total: total(snapshots),
    }
}

/// One bucket per UTC day from `now - 9 days` to `now`, oldest first.
pub fn daily_buckets(snapshots: &[InterventionSnapshot], now: DateTime<Utc>) -> Vec<DailyCount> {
    (0..DAILY_BUCKETS)
        .rev()
        .map(|days_ago| {
            let day = (now - Duration::days(days_ago)).date_naive();
            let count = snapshots.iter().filter(|s| s.date_creation.date_naive() == day).count();
            DailyCount {
                date: day.format("%Y-%m-%d").to_string(),
                count: u32::try_from(count).unwrap_or(u32::MAX),
            }
        })
        .collect()
}

/// Count and share per type, in order of first appearance.
pub fn type_breakdown(snapshots: &[InterventionSnapshot]) -> Vec<TypeBreakdown> {
    let total = total(snapshots);
    let mut breakdown: Vec<TypeBreakdown> = Vec::new();

    for snapshot in snapshots {
        match breakdown.iter_mut().find(|b| b.type_intervention == snapshot.type_intervention) {
            Some(entry) => entry.count += 1,
            None => breakdown.push(TypeBreakdown {
                type_intervention: snapshot.type_intervention,
                count: 1,
                percentage: 0,
            }),
        }
    }

    for entry in &mut breakdown {
        entry.percentage = round_percent(entry.count, total);
    }
    breakdown
}

pub fn technician_stats(snapshots: &[InterventionSnapshot], now: DateTime<Utc>) -> TechnicianStats {
    let totals = status_totals(snapshots);

    TechnicianStats {
        interventions_par_jour: daily_buckets(snapshots, now),
        temps_moyen_intervention: mean_resolution_minutes(snapshots),
        taux_reussite: round_percent(totals.terminees, total(snapshots)),
        repartition_par_type: type_breakdown(snapshots),
        totaux_mensuel: totals,
    }
}

/// Availability from the number of EN_COURS interventions. `HorsLigne` is
/// never derived.
pub fn technician_status(running: u32) -> TechnicianStatus {
    if running < BUSY_THRESHOLD {
        TechnicianStatus::Disponible
    } else {
        TechnicianStatus::Occupe
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hotelix_domain::TypeIntervention;

    use super::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn snap(
        kind: TypeIntervention,
        statut: Statut,
        created: DateTime<Utc>,
    ) -> InterventionSnapshot {
        InterventionSnapshot {
            type_intervention: kind,
            statut,
            date_creation: created,
            date_debut: None,
            date_fin: None,
        }
    }

    fn closed(minutes: i64) -> InterventionSnapshot {
        let debut = at(1, 8);
        InterventionSnapshot {
            date_debut: Some(debut),
            date_fin: Some(debut + Duration::minutes(minutes)),
            ..snap(TypeIntervention::Plomberie, Statut::Terminee, debut)
        }
    }

    #[test]
    fn round_percent_rounds_half_up() {
        assert_eq!(round_percent(0, 0), 0);
        assert_eq!(round_percent(1, 3), 33);
        assert_eq!(round_percent(2, 3), 67);
        assert_eq!(round_percent(1, 8), 13);
        assert_eq!(round_percent(4, 4), 100);
    }

    #[test]
    fn mean_resolution_ignores_open_and_undated_rows() {
        let mut open = closed(500);
        open.statut = Statut::EnCours;
        let mut undated = closed(500);
        undated.date_debut = None;

        let rows = [closed(30), closed(61), open, undated];
        assert_eq!(mean_resolution_minutes(&rows), 46);
        assert_eq!(mean_resolution_minutes(&[]), 0);
    }

    #[test]
    fn global_stats_counts_each_status() {
        let rows = [
            closed(60),
            closed(120),
            snap(TypeIntervention::Peinture, Statut::EnCours, at(2, 9)),
            snap(TypeIntervention::Peinture, Statut::Annulee, at(2, 9)),
            snap(TypeIntervention::Autre, Statut::EnAttente, at(3, 9)),
        ];

        let stats = global_stats(&rows);

        assert_eq!(stats.total_interventions, 5);
        assert_eq!(
            (stats.en_cours, stats.en_attente, stats.terminees, stats.annulees),
            (1, 1, 2, 1)
        );
        assert_eq!(stats.taux_reussite, 40);
        assert_eq!(stats.temps_moyen_resolution, 90);
    }

    #[test]
    fn empty_input_yields_zeroes() {
        assert_eq!(global_stats(&[]), GlobalStats::default());
        assert_eq!(intervention_counts(&[]), InterventionCounts::default());
    }

    #[test]
    fn daily_buckets_cover_ten_days_oldest_first() {
        let now = at(20, 18);
        let rows = [
            snap(TypeIntervention::Autre, Statut::EnAttente, at(20, 1)),
            snap(TypeIntervention::Autre, Statut::EnAttente, at(20, 17)),
            snap(TypeIntervention::Autre, Statut::EnAttente, at(11, 0)),
            snap(TypeIntervention::Autre, Statut::EnAttente, at(10, 23)),
        ];

        let buckets = daily_buckets(&rows, now);

        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0].date, "2025-03-11");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[9].date, "2025-03-20");
        assert_eq!(buckets[9].count, 2);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<u32>(), 3);
    }

    #[test]
    fn type_breakdown_keeps_first_appearance_order() {
        let rows = [
            snap(TypeIntervention::Electricite, Statut::EnAttente, at(1, 1)),
            snap(TypeIntervention::Plomberie, Statut::EnAttente, at(1, 2)),
            snap(TypeIntervention::Electricite, Statut::EnAttente, at(1, 3)),
        ];

        let breakdown = type_breakdown(&rows);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].type_intervention, TypeIntervention::Electricite);
        assert_eq!((breakdown[0].count, breakdown[0].percentage), (2, 67));
        assert_eq!((breakdown[1].count, breakdown[1].percentage), (1, 33));
    }

    #[test]
    fn technician_stats_combines_sections() {
        let rows = [closed(10), snap(TypeIntervention::Chauffage, Statut::EnCours, at(1, 9))];

        let stats = technician_stats(&rows, at(5, 12));

        assert_eq!(stats.taux_reussite, 50);
        assert_eq!(stats.temps_moyen_intervention, 10);
        assert_eq!(stats.totaux_mensuel.en_cours, 1);
        assert_eq!(stats.interventions_par_jour.len(), 10);
        assert_eq!(stats.repartition_par_type.len(), 2);
    }

    #[test]
    fn busy_from_three_running() {
        assert_eq!(technician_status(0), TechnicianStatus::Disponible);
        assert_eq!(technician_status(2), TechnicianStatus::Disponible);
        assert_eq!(technician_status(3), TechnicianStatus::Occupe);
    }

    #[test]
    fn window_start_treats_zero_as_unbounded() {
        let now = at(20, 0);
        assert_eq!(window_start(now, None), None);
        assert_eq!(window_start(now, Some(0)), None);
        assert_eq!(window_start(now, Some(7)), Some(at(13, 0)));
    }
}
