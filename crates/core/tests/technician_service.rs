//! Integration tests for technician views and assignment.

mod support;

use chrono::Duration;
use hotelix_core::{GlobalStatsKey, TechnicianStatsKey};
use hotelix_domain::{HotelixError, Priorite, Role, Statut, TechnicianFilter, TechnicianStatus};
use support::{intervention, Fixture};

struct Seed {
    hotel: i64,
    manager: i64,
    staff: i64,
    marc: i64,
    anne: i64,
    foreign_tech: i64,
    zone: i64,
}

fn seed(fx: &Fixture) -> Seed {
    let hotel = fx.store.add_hotel("Grand Hotel Paris").id;
    let other_hotel = fx.store.add_hotel("Club Med Palmiye").id;
    Seed {
        hotel,
        manager: fx.store.add_user(hotel, Role::Manager, Some("Claire"), "claire@hotel.fr").id,
        staff: fx.store.add_user(hotel, Role::Staff, Some("Sophie"), "sophie@hotel.fr").id,
        marc: fx.store.add_user(hotel, Role::Technicien, Some("Marc"), "marc@hotel.fr").id,
        anne: fx.store.add_user(hotel, Role::Technicien, Some("Anne"), "anne@hotel.fr").id,
        foreign_tech: fx.store.add_user(other_hotel, Role::Technicien, None, "ali@club.tr").id,
        zone: fx.store.add_zone(hotel, "Restaurant").id,
    }
}

/// Validates `list` behavior for workload figures and filtering.
///
/// Assertions:
/// - Confirms technicians are ordered by name.
/// - Confirms counts, last activity and status per technician.
/// - Confirms the search and status filters narrow the list.
#[tokio::test]
async fn list_reports_workload() {
    let fx = Fixture::new();
    let s = seed(&fx);
    let now = fx.now();

    for days in [1, 2, 3] {
        let mut row = intervention(s.hotel, s.staff, s.zone, now - Duration::days(days));
        row.assigne_id = Some(s.marc);
        row.statut = Statut::EnCours;
        fx.store.add_intervention(row);
    }

    let service = fx.technicians();
    let items = service.list(s.hotel, None).await.unwrap();

    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![s.anne, s.marc]);
    let marc = &items[1];
    assert_eq!((marc.interventions_en_cours, marc.interventions_total), (3, 3));
    assert_eq!(marc.dernier_activite, Some(now - Duration::days(1)));
    assert_eq!(marc.statut, TechnicianStatus::Occupe);
    assert_eq!(items[0].statut, TechnicianStatus::Disponible);
    assert_eq!(items[0].dernier_activite, None);

    let search = TechnicianFilter { search: Some("MARC".into()), ..TechnicianFilter::default() };
    assert_eq!(service.list(s.hotel, Some(&search)).await.unwrap().len(), 1);

    let free = TechnicianFilter {
        statut: Some("DISPONIBLE".into()),
        specialite: Some("ALL".into()),
        ..TechnicianFilter::default()
    };
    let available = service.list(s.hotel, Some(&free)).await.unwrap();
    assert_eq!(available.iter().map(|i| i.id).collect::<Vec<_>>(), vec![s.anne]);
}

/// Validates `get_by_id` hotel scoping.
///
/// Assertions:
/// - Confirms a technician of the same hotel is returned with their tickets.
/// - Confirms other hotels, non-technicians and unknown users yield `None`.
#[tokio::test]
async fn get_by_id_is_scoped_to_hotel() {
    let fx = Fixture::new();
    let s = seed(&fx);
    let now = fx.now();
    for days in [5, 1] {
        let mut row = intervention(s.hotel, s.staff, s.zone, now - Duration::days(days));
        row.assigne_id = Some(s.marc);
        fx.store.add_intervention(row);
    }
    let service = fx.technicians();

    let details = service.get_by_id(s.marc, s.manager).await.unwrap().unwrap();
    assert_eq!(details.total_assignees, 2);
    assert_eq!(details.hotel.id, s.hotel);
    assert!(
        details.interventions_assignees[0].intervention.date_creation
            > details.interventions_assignees[1].intervention.date_creation
    );

    assert!(service.get_by_id(s.foreign_tech, s.manager).await.unwrap().is_none());
    assert!(service.get_by_id(s.staff, s.manager).await.unwrap().is_none());
    assert!(service.get_by_id(s.marc, 9_999).await.unwrap().is_none());
}

/// Validates `available_interventions` ordering.
///
/// Assertions:
/// - Confirms assigned and closed tickets are excluded.
/// - Confirms urgent tickets come first, then oldest.
#[tokio::test]
async fn available_interventions_most_urgent_first() {
    let fx = Fixture::new();
    let s = seed(&fx);
    let now = fx.now();

    let old_normal =
        fx.store.add_intervention(intervention(s.hotel, s.staff, s.zone, now - Duration::days(3)));
    let new_normal = fx.store.add_intervention(intervention(s.hotel, s.staff, s.zone, now));
    let mut urgent = intervention(s.hotel, s.staff, s.zone, now - Duration::hours(1));
    urgent.priorite = Priorite::Urgente;
    urgent.statut = Statut::EnCours;
    let urgent = fx.store.add_intervention(urgent);

    let mut assigned = intervention(s.hotel, s.staff, s.zone, now);
    assigned.assigne_id = Some(s.marc);
    fx.store.add_intervention(assigned);
    let mut closed = intervention(s.hotel, s.staff, s.zone, now);
    closed.statut = Statut::Terminee;
    fx.store.add_intervention(closed);

    let rows = fx.technicians().available_interventions(s.hotel).await.unwrap();

    let ids: Vec<i64> = rows.iter().map(|r| r.intervention.id).collect();
    assert_eq!(ids, vec![urgent.id, old_normal.id, new_normal.id]);
}

/// Validates `assign_to_technician` success and guards.
///
/// Assertions:
/// - Confirms the ticket is assigned and reset to EN_ATTENTE.
/// - Confirms already-assigned tickets conflict.
/// - Confirms technicians of another hotel are not found.
#[tokio::test]
async fn assign_to_technician_rules() {
    let fx = Fixture::new();
    let s = seed(&fx);
    let service = fx.technicians();
    let first = fx.store.add_intervention(intervention(s.hotel, s.staff, s.zone, fx.now())).id;
    let second = fx.store.add_intervention(intervention(s.hotel, s.staff, s.zone, fx.now())).id;

    let outcome = service.assign_to_technician(first, s.anne, s.manager).await.unwrap();
    assert_eq!(outcome.message, "Intervention assignée à Anne");
    assert_eq!(fx.store.intervention(first).unwrap().assigne_id, Some(s.anne));

    assert_eq!(
        service.assign_to_technician(first, s.marc, s.manager).await.unwrap_err(),
        HotelixError::Conflict("Intervention déjà assignée".into())
    );
    assert_eq!(
        service.assign_to_technician(second, s.foreign_tech, s.manager).await.unwrap_err(),
        HotelixError::NotFound("Technicien non trouvé".into())
    );
    assert_eq!(
        service.assign_to_technician(second, s.marc, s.staff).await.unwrap_err(),
        HotelixError::Forbidden("Seul un manager peut assigner des interventions".into())
    );
    assert_eq!(
        service.assign_to_technician(9_999, s.marc, s.manager).await.unwrap_err(),
        HotelixError::NotFound("Intervention non trouvée".into())
    );
}

/// Validates cache eviction by `assign_to_technician`.
///
/// Assertions:
/// - Confirms the hotel and new assignee entries are evicted.
#[tokio::test]
async fn assign_to_technician_evicts_cached_stats() {
    let fx = Fixture::new();
    let s = seed(&fx);
    let id = fx.store.add_intervention(intervention(s.hotel, s.staff, s.zone, fx.now())).id;
    fx.stats.global_stats(s.hotel, Some(30)).await.unwrap();
    fx.stats.technician_stats(s.anne, None).await.unwrap();
    fx.stats.technician_stats(s.marc, Some(7)).await.unwrap();

    fx.technicians().assign_to_technician(id, s.anne, s.manager).await.unwrap();

    assert!(fx.cache.global(&GlobalStatsKey::new(s.hotel, Some(30))).is_none());
    assert!(fx.cache.technician(&TechnicianStatsKey::new(s.anne, None)).is_none());
    assert!(fx.cache.technician(&TechnicianStatsKey::new(s.marc, Some(7))).is_some());
}

/// Validates `stats` delegation to the cached stats.
///
/// Assertions:
/// - Confirms a zero period falls back to the 30-day window.
#[tokio::test]
async fn stats_default_period() {
    let fx = Fixture::new();
    let s = seed(&fx);
    let mut row = intervention(s.hotel, s.staff, s.zone, fx.now() - Duration::days(20));
    row.assigne_id = Some(s.marc);
    fx.store.add_intervention(row);

    let stats = fx.technicians().stats(s.marc, Some(0)).await.unwrap();

    assert_eq!(stats.totaux_mensuel.en_attente, 1);
    assert_eq!(stats.interventions_par_jour.iter().map(|d| d.count).sum::<u32>(), 0);
}
