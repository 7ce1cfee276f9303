//! r2d2 pool of SQLite connections

use std::path::{Path, PathBuf};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::config::SqlitePoolConfig;
use super::connection::SqliteConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::error::{StorageError, StorageResult};

/// Snapshot of pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_size: u32,
}

/// Connection pool over a single SQLite file
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlitePoolConfig,
    path: PathBuf,
}

impl SqlitePool {
    /// Open (creating if needed) the database at `path`.
    ///
    /// A first connection is checked out before returning so a bad path or
    /// unreadable file fails here rather than on the first query.
    #[instrument(skip_all, fields(db_path = %path.display(), pool_size = config.max_size))]
    pub fn open(path: &Path, config: SqlitePoolConfig) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            apply_connection_pragmas(conn, &pragma_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!(error = %e, "failed to build connection pool");
                StorageError::Connection(format!("Failed to create pool: {e}"))
            })?;

        drop(pool.get().map_err(|e| {
            warn!(error = %e, "failed to check out initial connection");
            StorageError::Connection(format!("Failed to get test connection: {e}"))
        })?);

        info!(max_connections = config.max_size, "sqlite pool ready");

        Ok(Self { pool, config, path: path.to_path_buf() })
    }

    /// Check a connection out of the pool.
    #[instrument(skip(self), fields(pool_size = self.config.max_size))]
    pub fn get(&self) -> StorageResult<SqliteConnection> {
        let start = std::time::Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                debug!(elapsed = ?start.elapsed(), "connection acquired");
                Ok(SqliteConnection::new(conn))
            }
            Err(e) if e.to_string().to_lowercase().contains("timed out") => {
                warn!(timeout = ?self.config.connection_timeout, "connection checkout timed out");
                Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
            }
            Err(e) => {
                warn!(error = %e, "connection checkout failed");
                Err(StorageError::Connection(format!("Failed to get connection: {e}")))
            }
        }
    }

    /// Round-trip `SELECT 1` on a pooled connection.
    pub fn health_check(&self) -> StorageResult<()> {
        let conn = self.get()?;
        let one: i64 = conn.query_row("SELECT 1", &[], |row| row.get(0))?;
        if one == 1 {
            Ok(())
        } else {
            Err(StorageError::Query(format!("health check returned {one}")))
        }
    }

    pub fn state(&self) -> PoolState {
        let state = self.pool.state();
        PoolState {
            connections: state.connections,
            idle_connections: state.idle_connections,
            max_size: self.config.max_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &SqlitePoolConfig {
        &self.config
    }
}
