//! Database implementations

mod columns;
pub mod hotel_repository;
pub mod intervention_repository;
pub mod manager;
pub mod seed;
pub mod user_repository;
pub mod zone_repository;

use hotelix_common::storage::{StorageError, StorageResult};
use hotelix_domain::Result;

pub use hotel_repository::SqliteHotelRepository;
pub use intervention_repository::SqliteInterventionRepository;
pub use manager::DbManager;
pub use seed::{seed_default_hotels, DEFAULT_HOTELS};
pub use user_repository::SqliteUserRepository;
pub use zone_repository::SqliteZoneRepository;

use crate::errors::map_storage_error;

/// Turn a missing row into `Ok(None)`.
fn optional_row<T>(result: StorageResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => Ok(None),
        Err(err) => Err(map_storage_error(err)),
    }
}
