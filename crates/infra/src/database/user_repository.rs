//! User account repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use hotelix_core::UserRepository;
use hotelix_domain::{NewUser, Result, Role, User};
use rusqlite::{params, Row};
use tokio::task;

use super::columns::{label, timestamp, to_millis};
use super::manager::DbManager;
use super::optional_row;
use crate::errors::{map_join_error, map_storage_error};

const SELECT_USER: &str = "SELECT id, email, password_hash, name, role, specialite, hotel_id,
        created_at
 FROM users";

/// SQLite-backed implementation of `UserRepository`
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Lookup by email, optionally restricted to one hotel.
    async fn find_by_email_in(&self, email: &str, hotel_id: Option<i64>) -> Result<Option<User>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> Result<Option<User>> {
            let conn = db.get_connection()?;
            optional_row(conn.query_row(
                &format!("{SELECT_USER} WHERE email = ?1 AND (?2 IS NULL OR hotel_id = ?2)"),
                params![email, hotel_id],
                map_user_row,
            ))
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Option<User>> {
            let conn = db.get_connection()?;
            optional_row(conn.query_row(
                &format!("{SELECT_USER} WHERE id = ?1"),
                params![id],
                map_user_row,
            ))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_by_email_in(email, None).await
    }

    async fn find_by_email_and_hotel(&self, email: &str, hotel_id: i64) -> Result<Option<User>> {
        self.find_by_email_in(email, Some(hotel_id)).await
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<User> {
            let conn = db.get_connection()?;
            let created_at = Utc::now();

            conn.execute(
                "INSERT INTO users (email, password_hash, name, role, specialite, hotel_id,
                                    created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user.email,
                    user.password_hash,
                    user.name,
                    user.role.as_str(),
                    user.specialite,
                    user.hotel_id,
                    to_millis(created_at),
                ],
            )
            .map_err(map_storage_error)?;

            let id = conn.last_insert_rowid();
            conn.query_row(&format!("{SELECT_USER} WHERE id = ?1"), params![id], map_user_row)
                .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_technicians(&self, hotel_id: i64) -> Result<Vec<User>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<User>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "{SELECT_USER} WHERE hotel_id = ?1 AND role = ?2
                     ORDER BY name IS NULL, name ASC, id ASC"
                ))
                .map_err(map_storage_error)?;
            stmt.query_map(params![hotel_id, Role::Technicien.as_str()], map_user_row)
                .map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        role: label(row, 4)?,
        specialite: row.get(5)?,
        hotel_id: row.get(6)?,
        created_at: timestamp(row, 7)?,
    })
}
