//! Default reference data

use hotelix_common::storage::SqliteConnection;
use hotelix_domain::Result;
use rusqlite::params;

use crate::errors::{map_sql_error, map_storage_error};

/// Hotels inserted into an empty database: `(nom, adresse, pays)`.
pub const DEFAULT_HOTELS: [(&str, &str, &str); 3] = [
    ("Club Med Palmiye", "Kemer, Antalya", "Turquie"),
    ("Grand Hotel Paris", "Avenue des Champs-Élysées", "France"),
    ("Hotel Barcelona Plaza", "Plaça Catalunya", "Espagne"),
];

/// Insert [`DEFAULT_HOTELS`] if no hotel exists yet. Returns the number of
/// rows inserted.
pub fn seed_default_hotels(conn: &mut SqliteConnection) -> Result<usize> {
    let tx = conn.transaction().map_err(map_storage_error)?;

    let existing: i64 =
        tx.query_row("SELECT COUNT(*) FROM hotels", [], |row| row.get(0)).map_err(map_sql_error)?;
    if existing > 0 {
        return Ok(0);
    }

    for (nom, adresse, pays) in DEFAULT_HOTELS {
        tx.execute(
            "INSERT INTO hotels (nom, adresse, pays) VALUES (?1, ?2, ?3)",
            params![nom, adresse, pays],
        )
        .map_err(map_sql_error)?;
    }

    tx.commit().map_err(map_sql_error)?;
    Ok(DEFAULT_HOTELS.len())
}
