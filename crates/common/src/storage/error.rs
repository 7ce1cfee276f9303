//! Storage error types

use thiserror::Error;

use crate::error::{ErrorClassification, ErrorSeverity};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(String),

    #[error("Connection timeout after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Underlying rusqlite error, if any
    pub fn as_rusqlite(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Rusqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorClassification for StorageError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) | Self::R2d2(_) => true,
            Self::Rusqlite(err) => matches!(
                err.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            Self::Query(_) | Self::Io(_) => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rusqlite(rusqlite::Error::QueryReturnedNoRows) => ErrorSeverity::Info,
            Self::Rusqlite(err) => match err.sqlite_error_code() {
                Some(rusqlite::ErrorCode::ConstraintViolation) => ErrorSeverity::Info,
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                    ErrorSeverity::Warning
                }
                Some(rusqlite::ErrorCode::DatabaseCorrupt | rusqlite::ErrorCode::NotADatabase) => {
                    ErrorSeverity::Critical
                }
                _ => ErrorSeverity::Error,
            },
            Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Io(_) => ErrorSeverity::Critical,
            Self::Connection(_) | Self::Query(_) | Self::R2d2(_) => ErrorSeverity::Error,
        }
    }
}
