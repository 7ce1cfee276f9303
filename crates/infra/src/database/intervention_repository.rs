//! Intervention repository implementation using SQLite
//!
//! Relation queries join the requester, assignee, zone and sous-zone in a
//! single statement. Filters bind every bound and let SQL skip the NULL ones.

use std::sync::Arc;

use async_trait::async_trait;
use hotelix_core::InterventionRepository;
use hotelix_domain::{
    AssigneRef, DemandeurRef, HotelixError, Intervention, InterventionFilter,
    InterventionSnapshot, InterventionWithRelations, NewIntervention, Result, SousZoneRef, Statut,
    ZoneRef,
};
use rusqlite::{params, Row};
use tokio::task;

use super::columns::{label, opt_millis, opt_timestamp, timestamp, to_millis};
use super::manager::DbManager;
use super::optional_row;
use crate::errors::{map_join_error, map_storage_error};

const INTERVENTION_COLUMNS: &str = "i.id, i.titre, i.description, i.statut, i.type, i.priorite,
        i.origine, i.date_creation, i.date_debut, i.date_fin, i.hotel_id, i.demandeur_id,
        i.assigne_id, i.zone_id, i.sous_zone_id";

const RELATION_COLUMNS: &str = "d.name, d.email, d.role, a.name, a.email, a.specialite,
        z.nom, z.type, sz.nom";

const RELATION_JOINS: &str = "FROM interventions i
 JOIN users d ON d.id = i.demandeur_id
 LEFT JOIN users a ON a.id = i.assigne_id
 JOIN zones z ON z.id = i.zone_id
 LEFT JOIN sous_zones sz ON sz.id = i.sous_zone_id";

const FILTER_CLAUSE: &str = "(?1 IS NULL OR i.hotel_id = ?1)
   AND (?2 IS NULL OR i.assigne_id = ?2)
   AND (?3 IS NULL OR i.date_creation >= ?3)
   AND (?4 IS NULL OR i.date_creation <= ?4)";

const PRIORITY_RANK: &str = "CASE i.priorite
     WHEN 'URGENTE' THEN 3 WHEN 'HAUTE' THEN 2 WHEN 'NORMALE' THEN 1 ELSE 0 END";

/// SQLite-backed implementation of `InterventionRepository`
pub struct SqliteInterventionRepository {
    db: Arc<DbManager>,
}

impl SqliteInterventionRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn query_relations(
        &self,
        sql: String,
        filter: InterventionFilter,
    ) -> Result<Vec<InterventionWithRelations>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<InterventionWithRelations>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_storage_error)?;
            stmt.query_map(
                params![
                    filter.hotel_id,
                    filter.assigne_id,
                    opt_millis(filter.created_from),
                    opt_millis(filter.created_to),
                ],
                map_relations_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl InterventionRepository for SqliteInterventionRepository {
    async fn create(&self, new: NewIntervention) -> Result<Intervention> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Intervention> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO interventions (titre, description, statut, type, priorite, origine,
                                            date_creation, hotel_id, demandeur_id, assigne_id,
                                            zone_id, sous_zone_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    new.titre,
                    new.description,
                    new.statut.as_str(),
                    new.type_intervention.as_str(),
                    new.priorite.as_str(),
                    new.origine.as_str(),
                    to_millis(new.date_creation),
                    new.hotel_id,
                    new.demandeur_id,
                    new.assigne_id,
                    new.zone_id,
                    new.sous_zone_id,
                ],
            )
            .map_err(map_storage_error)?;

            Ok(Intervention {
                id: conn.last_insert_rowid(),
                titre: new.titre,
                description: new.description,
                statut: new.statut,
                type_intervention: new.type_intervention,
                priorite: new.priorite,
                origine: new.origine,
                date_creation: new.date_creation,
                date_debut: None,
                date_fin: None,
                hotel_id: new.hotel_id,
                demandeur_id: new.demandeur_id,
                assigne_id: new.assigne_id,
                zone_id: new.zone_id,
                sous_zone_id: new.sous_zone_id,
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Intervention>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Option<Intervention>> {
            let conn = db.get_connection()?;
            optional_row(conn.query_row(
                &format!("SELECT {INTERVENTION_COLUMNS} FROM interventions i WHERE i.id = ?1"),
                params![id],
                map_intervention_row,
            ))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_with_relations(
        &self,
        filter: InterventionFilter,
    ) -> Result<Vec<InterventionWithRelations>> {
        let sql = format!(
            "SELECT {INTERVENTION_COLUMNS}, {RELATION_COLUMNS} {RELATION_JOINS}
             WHERE {FILTER_CLAUSE}
             ORDER BY i.date_creation DESC, i.id DESC"
        );
        self.query_relations(sql, filter).await
    }

    async fn list_available(&self, hotel_id: i64) -> Result<Vec<InterventionWithRelations>> {
        let sql = format!(
            "SELECT {INTERVENTION_COLUMNS}, {RELATION_COLUMNS} {RELATION_JOINS}
             WHERE {FILTER_CLAUSE}
               AND i.assigne_id IS NULL
               AND i.statut IN ('{waiting}', '{running}')
             ORDER BY {PRIORITY_RANK} DESC, i.date_creation ASC, i.id ASC",
            waiting = Statut::EnAttente.as_str(),
            running = Statut::EnCours.as_str(),
        );
        self.query_relations(sql, InterventionFilter::for_hotel(hotel_id)).await
    }

    async fn update(&self, intervention: &Intervention) -> Result<Intervention> {
        let db = Arc::clone(&self.db);
        let intervention = intervention.clone();

        task::spawn_blocking(move || -> Result<Intervention> {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE interventions
                     SET titre = ?1, description = ?2, statut = ?3, type = ?4, priorite = ?5,
                         origine = ?6, date_debut = ?7, date_fin = ?8, assigne_id = ?9,
                         zone_id = ?10, sous_zone_id = ?11
                     WHERE id = ?12",
                    params![
                        intervention.titre,
                        intervention.description,
                        intervention.statut.as_str(),
                        intervention.type_intervention.as_str(),
                        intervention.priorite.as_str(),
                        intervention.origine.as_str(),
                        opt_millis(intervention.date_debut),
                        opt_millis(intervention.date_fin),
                        intervention.assigne_id,
                        intervention.zone_id,
                        intervention.sous_zone_id,
                        intervention.id,
                    ],
                )
                .map_err(map_storage_error)?;

            if updated == 0 {
                return Err(HotelixError::NotFound("Intervention non trouvée".into()));
            }
            Ok(intervention)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn snapshots(&self, filter: InterventionFilter) -> Result<Vec<InterventionSnapshot>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<InterventionSnapshot>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT i.type, i.statut, i.date_creation, i.date_debut, i.date_fin
                     FROM interventions i
                     WHERE {FILTER_CLAUSE}
                     ORDER BY i.date_creation ASC, i.id ASC"
                ))
                .map_err(map_storage_error)?;
            stmt.query_map(
                params![
                    filter.hotel_id,
                    filter.assigne_id,
                    opt_millis(filter.created_from),
                    opt_millis(filter.created_to),
                ],
                map_snapshot_row,
            )
            .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_intervention_row(row: &Row<'_>) -> rusqlite::Result<Intervention> {
    Ok(Intervention {
        id: row.get(0)?,
        titre: row.get(1)?,
        description: row.get(2)?,
        statut: label(row, 3)?,
        type_intervention: label(row, 4)?,
        priorite: label(row, 5)?,
        origine: label(row, 6)?,
        date_creation: timestamp(row, 7)?,
        date_debut: opt_timestamp(row, 8)?,
        date_fin: opt_timestamp(row, 9)?,
        hotel_id: row.get(10)?,
        demandeur_id: row.get(11)?,
        assigne_id: row.get(12)?,
        zone_id: row.get(13)?,
        sous_zone_id: row.get(14)?,
    })
}

fn map_relations_row(row: &Row<'_>) -> rusqlite::Result<InterventionWithRelations> {
    let intervention = map_intervention_row(row)?;

    let demandeur = DemandeurRef {
        id: intervention.demandeur_id,
        name: row.get(15)?,
        email: row.get(16)?,
        role: label(row, 17)?,
    };

    // LEFT JOIN columns are NULL when the reference is unset.
    let assigne = match (intervention.assigne_id, row.get::<_, Option<String>>(19)?) {
        (Some(id), Some(email)) => {
            Some(AssigneRef { id, name: row.get(18)?, email, specialite: row.get(20)? })
        }
        _ => None,
    };

    let zone = ZoneRef { id: intervention.zone_id, nom: row.get(21)?, type_zone: label(row, 22)? };

    let sous_zone = match (intervention.sous_zone_id, row.get::<_, Option<String>>(23)?) {
        (Some(id), Some(nom)) => Some(SousZoneRef { id, nom }),
        _ => None,
    };

    Ok(InterventionWithRelations { intervention, demandeur, assigne, zone, sous_zone })
}

fn map_snapshot_row(row: &Row<'_>) -> rusqlite::Result<InterventionSnapshot> {
    Ok(InterventionSnapshot {
        type_intervention: label(row, 0)?,
        statut: label(row, 1)?,
        date_creation: timestamp(row, 2)?,
        date_debut: opt_timestamp(row, 3)?,
        date_fin: opt_timestamp(row, 4)?,
    })
}
