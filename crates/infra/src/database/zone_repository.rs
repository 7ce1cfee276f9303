//! Zone and sous-zone repository implementation using SQLite

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hotelix_core::ZoneRepository;
use hotelix_domain::{
    HotelixError, Result, SousZone, SousZoneRef, TypeZone, Zone, ZoneWithSousZones,
};
use rusqlite::{params, Row};
use tokio::task;

use super::columns::label;
use super::manager::DbManager;
use crate::errors::{map_join_error, map_sql_error, map_storage_error};

/// SQLite-backed implementation of `ZoneRepository`
pub struct SqliteZoneRepository {
    db: Arc<DbManager>,
}

impl SqliteZoneRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ZoneRepository for SqliteZoneRepository {
    async fn list_with_sous_zones(&self, hotel_id: i64) -> Result<Vec<ZoneWithSousZones>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<ZoneWithSousZones>> {
            let conn = db.get_connection()?;

            let zones = conn
                .prepare(
                    "SELECT id, nom, type, hotel_id FROM zones
                     WHERE hotel_id = ?1 ORDER BY nom ASC, id ASC",
                )
                .map_err(map_storage_error)?
                .query_map(params![hotel_id], map_zone_row)
                .map_err(map_storage_error)?;

            let sous_zones = conn
                .prepare(
                    "SELECT sz.id, sz.nom, sz.zone_id FROM sous_zones sz
                     JOIN zones z ON z.id = sz.zone_id
                     WHERE z.hotel_id = ?1 ORDER BY sz.nom ASC, sz.id ASC",
                )
                .map_err(map_storage_error)?
                .query_map(params![hotel_id], map_sous_zone_row)
                .map_err(map_storage_error)?;

            let mut by_zone: HashMap<i64, Vec<SousZoneRef>> = HashMap::new();
            for sous_zone in sous_zones {
                by_zone
                    .entry(sous_zone.zone_id)
                    .or_default()
                    .push(SousZoneRef { id: sous_zone.id, nom: sous_zone.nom });
            }

            Ok(zones
                .into_iter()
                .map(|zone| ZoneWithSousZones {
                    sous_zones: by_zone.remove(&zone.id).unwrap_or_default(),
                    id: zone.id,
                    nom: zone.nom,
                    type_zone: zone.type_zone,
                })
                .collect())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create_zone(&self, hotel_id: i64, nom: &str, type_zone: TypeZone) -> Result<Zone> {
        let db = Arc::clone(&self.db);
        let nom = nom.to_string();

        task::spawn_blocking(move || -> Result<Zone> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO zones (nom, type, hotel_id) VALUES (?1, ?2, ?3)",
                params![nom, type_zone.as_str(), hotel_id],
            )
            .map_err(map_storage_error)?;

            Ok(Zone { id: conn.last_insert_rowid(), nom, type_zone, hotel_id })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create_sous_zone(&self, zone_id: i64, nom: &str) -> Result<SousZone> {
        let db = Arc::clone(&self.db);
        let nom = nom.to_string();

        task::spawn_blocking(move || -> Result<SousZone> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO sous_zones (nom, zone_id) VALUES (?1, ?2)",
                params![nom, zone_id],
            )
            .map_err(map_storage_error)?;

            Ok(SousZone { id: conn.last_insert_rowid(), nom, zone_id })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_zone(&self, zone_id: i64) -> Result<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<()> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_storage_error)?;

            let children: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM sous_zones WHERE zone_id = ?1",
                    params![zone_id],
                    |row| row.get(0),
                )
                .map_err(map_sql_error)?;
            if children > 0 {
                return Err(HotelixError::Conflict("zone still has sous-zones".into()));
            }

            let deleted = tx
                .execute("DELETE FROM zones WHERE id = ?1", params![zone_id])
                .map_err(map_sql_error)?;
            if deleted == 0 {
                return Err(HotelixError::NotFound(format!("zone {zone_id} not found")));
            }

            tx.commit().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_zone_row(row: &Row<'_>) -> rusqlite::Result<Zone> {
    Ok(Zone { id: row.get(0)?, nom: row.get(1)?, type_zone: label(row, 2)?, hotel_id: row.get(3)? })
}

fn map_sous_zone_row(row: &Row<'_>) -> rusqlite::Result<SousZone> {
    Ok(SousZone { id: row.get(0)?, nom: row.get(1)?, zone_id: row.get(2)? })
}
