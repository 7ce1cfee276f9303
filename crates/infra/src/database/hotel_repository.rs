//! Hotel repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use hotelix_core::HotelRepository;
use hotelix_domain::{Hotel, Result};
use rusqlite::{params, Row};
use tokio::task;

use super::manager::DbManager;
use super::optional_row;
use crate::errors::{map_join_error, map_storage_error};

const SELECT_HOTEL: &str = "SELECT id, nom, adresse, pays FROM hotels";

/// SQLite-backed implementation of `HotelRepository`
pub struct SqliteHotelRepository {
    db: Arc<DbManager>,
}

impl SqliteHotelRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HotelRepository for SqliteHotelRepository {
    async fn list(&self) -> Result<Vec<Hotel>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<Hotel>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!("{SELECT_HOTEL} ORDER BY nom ASC"))
                .map_err(map_storage_error)?;
            stmt.query_map(params![], map_hotel_row).map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Option<Hotel>> {
            let conn = db.get_connection()?;
            optional_row(conn.query_row(
                &format!("{SELECT_HOTEL} WHERE id = ?1"),
                params![id],
                map_hotel_row,
            ))
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_hotel_row(row: &Row<'_>) -> rusqlite::Result<Hotel> {
    Ok(Hotel { id: row.get(0)?, nom: row.get(1)?, adresse: row.get(2)?, pays: row.get(3)? })
}
