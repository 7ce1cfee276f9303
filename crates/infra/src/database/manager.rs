//! Database connection manager backed by the shared SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hotelix_common::storage::{SqliteConnection, SqlitePool, SqlitePoolConfig};
use hotelix_domain::{DatabaseConfig, Result};
use rusqlite::params;
use tracing::{info, instrument};

use super::columns::to_millis;
use super::seed;
use crate::errors::{map_sql_error, map_storage_error};

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps a [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database file with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let config = SqlitePoolConfig::default().with_max_size(pool_size.max(1));

        let pool = SqlitePool::open(&path, config).map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.config().max_size,
            "sqlite pool initialised"
        );

        Ok(Self { pool: Arc::new(pool), path })
    }

    /// Open the database, apply the schema and seed it when configured to.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let manager = Self::new(&config.path, config.pool_size)?;
        manager.run_migrations()?;
        if config.seed_defaults {
            manager.seed_defaults()?;
        }
        Ok(manager)
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(map_storage_error)
    }

    /// Ensure the full schema exists on the current database.
    #[instrument(skip(self), fields(db_path = %self.path.display()))]
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)
    }

    /// Insert the default hotels when the hotels table is empty.
    ///
    /// Returns the number of hotels inserted.
    #[instrument(skip(self))]
    pub fn seed_defaults(&self) -> Result<usize> {
        let mut conn = self.get_connection()?;
        let inserted = seed::seed_default_hotels(&mut conn)?;
        if inserted > 0 {
            info!(inserted, "default hotels seeded");
        }
        Ok(inserted)
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database answers a trivial query.
    pub fn health_check(&self) -> Result<()> {
        self.pool.health_check().map_err(map_storage_error)
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, ?2)",
        params![SCHEMA_VERSION, to_millis(chrono::Utc::now())],
    )
    .map_err(map_storage_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn open(temp_dir: &TempDir) -> DbManager {
        DbManager::new(temp_dir.path().join("test.db"), 4).expect("manager created")
    }

    #[test]
    fn migrations_create_schema_version() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let manager = open(&temp_dir);
        manager.run_migrations().expect("migrations run");
        manager.run_migrations().expect("migrations are idempotent");

        let conn = manager.get_connection().expect("connection acquired");
        let version: i32 =
            conn.query_row("SELECT version FROM schema_version", &[], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let manager = open(&temp_dir);
        manager.run_migrations().expect("migrations run");

        manager.health_check().expect("health check passed");
    }

    #[test]
    fn from_config_seeds_once() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let config = DatabaseConfig {
            path: temp_dir.path().join("seeded.db").display().to_string(),
            pool_size: 2,
            seed_defaults: true,
        };

        let manager = DbManager::from_config(&config).expect("manager created");
        assert_eq!(manager.seed_defaults().unwrap(), 0);

        let conn = manager.get_connection().unwrap();
        let hotels: i64 =
            conn.query_row("SELECT COUNT(*) FROM hotels", &[], |row| row.get(0)).unwrap();
        assert_eq!(hotels, 3);
    }
}
