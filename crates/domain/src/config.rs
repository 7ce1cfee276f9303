//! Application configuration structures
//!
//! Populated by the infra loader from environment variables or a
//! TOML/JSON file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_MAX_SIZE, DEFAULT_CACHE_TRIM_HEADROOM, DEFAULT_CACHE_TTL_MS, DEFAULT_DB_PATH,
    DEFAULT_HOST, DEFAULT_POOL_SIZE, DEFAULT_PORT,
};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// SQLite database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
    /// Insert the default hotels when the hotels table is empty.
    #[serde(default = "default_seed")]
    pub seed_defaults: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            seed_defaults: true,
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.to_string(), port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Stats cache tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    pub ttl_ms: u64,
    pub max_size: usize,
    #[serde(default = "default_headroom")]
    pub trim_headroom: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_CACHE_TTL_MS,
            max_size: DEFAULT_CACHE_MAX_SIZE,
            trim_headroom: DEFAULT_CACHE_TRIM_HEADROOM,
        }
    }
}

const fn default_seed() -> bool {
    true
}

const fn default_headroom() -> usize {
    DEFAULT_CACHE_TRIM_HEADROOM
}
