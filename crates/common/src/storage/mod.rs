//! SQLite storage plumbing
//!
//! An r2d2 pool of rusqlite connections with per-connection pragmas applied
//! on checkout, plus a thin connection wrapper whose helpers return
//! [`StorageResult`]. Schema and queries belong to the application.

pub mod error;
pub mod sqlite;

pub use error::{StorageError, StorageResult};
pub use sqlite::{SqliteConnection, SqlitePool, SqlitePoolConfig, SqliteStatement};
