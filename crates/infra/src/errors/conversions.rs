//! Conversions from storage errors into domain errors.

use hotelix_common::error::{ErrorClassification, ErrorSeverity};
use hotelix_common::storage::StorageError;
use hotelix_domain::HotelixError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;
use tracing::{debug, error, warn, Level};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HotelixError);

impl From<InfraError> for HotelixError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HotelixError> for InfraError {
    fn from(value: HotelixError) -> Self {
        Self(value)
    }
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → HotelixError */
/* -------------------------------------------------------------------------- */

fn sql_to_domain(err: SqlError) -> HotelixError {
    use rusqlite::ffi::ErrorCode;
    use rusqlite::Error as RE;

    match err {
        RE::SqliteFailure(failure, message) => {
            let message = message.unwrap_or_default();
            match (failure.code, failure.extended_code) {
                (ErrorCode::DatabaseBusy, _) => HotelixError::Database("database is busy".into()),
                (ErrorCode::DatabaseLocked, _) => {
                    HotelixError::Database("database is locked".into())
                }
                (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                    HotelixError::Conflict("unique constraint violation".into())
                }
                (ErrorCode::ConstraintViolation, 787) => {
                    HotelixError::Conflict("foreign key constraint violation".into())
                }
                _ => HotelixError::Database(format!(
                    "sqlite failure {:?} (code {}): {message}",
                    failure.code, failure.extended_code
                )),
            }
        }
        RE::QueryReturnedNoRows => HotelixError::NotFound("no rows returned by query".into()),
        RE::FromSqlConversionFailure(column, _, cause) => {
            HotelixError::Database(format!("failed to convert column {column}: {cause}"))
        }
        RE::InvalidColumnType(_, name, ty) => {
            HotelixError::Database(format!("invalid column type for {name}: {ty}"))
        }
        RE::InvalidPath(path) => {
            HotelixError::Database(format!("invalid database path: {}", path.to_string_lossy()))
        }
        other => HotelixError::Database(other.to_string()),
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        Self(sql_to_domain(value))
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → HotelixError */
/* -------------------------------------------------------------------------- */

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        let err = match value {
            StorageError::Rusqlite(err) => sql_to_domain(err),
            StorageError::Timeout(seconds) => {
                HotelixError::Database(format!("database timeout after {seconds}s"))
            }
            other => HotelixError::Database(other.to_string()),
        };
        Self(err)
    }
}

/// Log level for a storage failure, from its severity.
fn log_level(err: &StorageError) -> Level {
    match err.severity() {
        ErrorSeverity::Info => Level::DEBUG,
        ErrorSeverity::Warning => Level::WARN,
        ErrorSeverity::Error | ErrorSeverity::Critical => Level::ERROR,
    }
}

/// Map a storage failure into the domain error, logging it at a level
/// matching its severity.
pub fn map_storage_error(err: StorageError) -> HotelixError {
    let retryable = err.is_retryable();
    let level = log_level(&err);
    if level == Level::DEBUG {
        debug!(error = %err, retryable, "storage call failed");
    } else if level == Level::WARN {
        warn!(error = %err, retryable, "storage call failed");
    } else {
        error!(error = %err, retryable, critical = err.is_critical(), "storage call failed");
    }
    InfraError::from(err).into()
}

pub fn map_sql_error(err: SqlError) -> HotelixError {
    InfraError::from(err).into()
}

/// Map a failed `spawn_blocking` join into the domain error.
pub fn map_join_error(err: JoinError) -> HotelixError {
    if err.is_cancelled() {
        HotelixError::Internal("blocking database task cancelled".into())
    } else {
        HotelixError::Internal(format!("blocking database task failed: {err}"))
    }
}
