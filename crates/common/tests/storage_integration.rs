//! Integration tests for pooled SQLite storage

#![cfg(feature = "platform")]

use hotelix_common::error::ErrorClassification;
use hotelix_common::storage::{SqlitePool, SqlitePoolConfig, StorageError};
use tempfile::TempDir;

/// Verifies foreign keys are enforced on every pooled connection.
///
/// # Test Steps
/// 1. Create parent/child tables on one connection
/// 2. Insert an orphan child on another connection
/// 3. Verify the constraint violation surfaces as a non-retryable error
#[test]
fn test_foreign_keys_enforced_across_connections() {
    let dir = TempDir::new().unwrap();
    let pool = SqlitePool::open(&dir.path().join("fk.db"), SqlitePoolConfig::default()).unwrap();

    pool.get()
        .unwrap()
        .execute_batch(
            "CREATE TABLE zones (id INTEGER PRIMARY KEY);
             CREATE TABLE sous_zones (id INTEGER PRIMARY KEY,
                 zone_id INTEGER NOT NULL REFERENCES zones(id));",
        )
        .unwrap();

    let _held = pool.get().unwrap();
    let conn = pool.get().unwrap();
    let err = conn.execute("INSERT INTO sous_zones (zone_id) VALUES (?1)", &[&42]).unwrap_err();

    assert!(matches!(err, StorageError::Rusqlite(_)));
    assert!(!err.is_retryable());
}

/// Verifies data written through one pool is visible after reopening.
#[test]
fn test_reopen_sees_committed_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reopen.db");

    {
        let pool = SqlitePool::open(&path, SqlitePoolConfig::default()).unwrap();
        let conn = pool.get().unwrap();
        conn.execute("CREATE TABLE hotels (id INTEGER PRIMARY KEY, nom TEXT)", &[]).unwrap();
        conn.execute("INSERT INTO hotels (nom) VALUES (?1)", &[&"Grand Hotel Paris"]).unwrap();
    }

    let pool = SqlitePool::open(&path, SqlitePoolConfig::default().with_max_size(2)).unwrap();
    let nom: String = pool
        .get()
        .unwrap()
        .query_row("SELECT nom FROM hotels WHERE id = ?1", &[&1], |row| row.get(0))
        .unwrap();
    assert_eq!(nom, "Grand Hotel Paris");
}
