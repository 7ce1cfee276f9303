//! Pooled SQLite connections

pub mod config;
pub mod connection;
pub mod pool;
pub mod pragmas;

pub use config::SqlitePoolConfig;
pub use connection::{SqliteConnection, SqliteStatement};
pub use pool::{PoolState, SqlitePool};
pub use pragmas::apply_connection_pragmas;
