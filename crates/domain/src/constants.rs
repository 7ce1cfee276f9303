//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Configuration defaults
pub const DEFAULT_DB_PATH: &str = "hotelix.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Stats cache
pub const DEFAULT_CACHE_TTL_MS: u64 = 60_000;
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;
pub const DEFAULT_CACHE_TRIM_HEADROOM: usize = 10;

// Stats windows
pub const DEFAULT_TECHNICIAN_PERIOD_DAYS: u32 = 30;
pub const DAILY_BUCKETS: i64 = 10;
pub const WARMUP_PERIODS: [Option<u32>; 3] = [None, Some(7), Some(30)];

/// A technician with this many running interventions is reported busy.
pub const BUSY_THRESHOLD: u32 = 3;
