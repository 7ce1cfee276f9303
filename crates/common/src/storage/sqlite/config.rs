//! SQLite pool configuration

use std::time::Duration;

/// r2d2 and pragma settings for a [`super::SqlitePool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlitePoolConfig {
    pub max_size: u32,

    /// How long a checkout waits for a free connection
    pub connection_timeout: Duration,

    /// SQLite busy handler timeout
    pub busy_timeout: Duration,

    pub enable_wal: bool,

    pub enable_foreign_keys: bool,
}

impl SqlitePoolConfig {
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}
