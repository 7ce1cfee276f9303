//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when the required ones are present
//! 2. Otherwise the first config file found by [`find_config_file`]
//! 3. Otherwise [`Config::default`]
//!
//! ## Environment Variables
//! - `HOTELIX_DB_PATH` (required): SQLite database file
//! - `HOTELIX_DB_POOL_SIZE` (required): connection pool size
//! - `HOTELIX_SEED`: seed the default hotels (default `true`)
//! - `HOTELIX_HOST`, `HOTELIX_PORT`: HTTP listener
//! - `HOTELIX_CACHE_TTL_MS`, `HOTELIX_CACHE_MAX_SIZE`: stats cache tuning
//!
//! ## File Locations
//! `config.{json,toml}` and `hotelix.{json,toml}` are searched in the current
//! directory, its two parents, then the same places relative to the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use hotelix_domain::{CacheSettings, Config, DatabaseConfig, HotelixError, Result, ServerConfig};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "hotelix.json", "hotelix.toml"];
const PARENT_DIRS: [&str; 3] = [".", "..", "../.."];

/// Load configuration with automatic fallback.
///
/// # Errors
/// Returns `HotelixError::Config` when the config file found on disk cannot be read
/// or parsed. Environment errors fall through to the file.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match find_config_file() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No configuration source found, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables.
///
/// # Errors
/// Returns `HotelixError::Config` if a required variable is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("HOTELIX_DB_PATH")?;
    let pool_size = parse_value("HOTELIX_DB_POOL_SIZE", &env_var("HOTELIX_DB_POOL_SIZE")?)?;
    let seed_defaults = env_bool("HOTELIX_SEED", true);

    let server_defaults = ServerConfig::default();
    let server = ServerConfig {
        host: std::env::var("HOTELIX_HOST").unwrap_or(server_defaults.host),
        port: env_parse("HOTELIX_PORT")?.unwrap_or(server_defaults.port),
    };

    let cache_defaults = CacheSettings::default();
    let cache = CacheSettings {
        ttl_ms: env_parse("HOTELIX_CACHE_TTL_MS")?.unwrap_or(cache_defaults.ttl_ms),
        max_size: env_parse("HOTELIX_CACHE_MAX_SIZE")?.unwrap_or(cache_defaults.max_size),
        trim_headroom: cache_defaults.trim_headroom,
    };

    Ok(Config { database: DatabaseConfig { path, pool_size, seed_defaults }, server, cache })
}

/// Load configuration from a file.
///
/// If `path` is `None`, searches the standard locations. JSON and TOML are
/// supported, detected by file extension.
///
/// # Errors
/// Returns `HotelixError::Config` if no file is found, it cannot be read, or
/// it does not parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HotelixError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            HotelixError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HotelixError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HotelixError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HotelixError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(HotelixError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations, if any.
pub fn find_config_file() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| PARENT_DIRS.iter().map(move |dir| root.join(dir)))
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| HotelixError::Config(format!("Missing required environment variable: {key}")))
}

/// Optional numeric variable; set but unparsable is an error.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key).ok().map(|raw| parse_value(key, &raw)).transpose()
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| HotelixError::Config(format!("Invalid {key}: {e}")))
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 7] = [
        "HOTELIX_DB_PATH",
        "HOTELIX_DB_POOL_SIZE",
        "HOTELIX_SEED",
        "HOTELIX_HOST",
        "HOTELIX_PORT",
        "HOTELIX_CACHE_TTL_MS",
        "HOTELIX_CACHE_MAX_SIZE",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("HOTELIX_TEST_BOOL_ON", "ON");
        std::env::set_var("HOTELIX_TEST_BOOL_OFF", "no");
        std::env::remove_var("HOTELIX_TEST_BOOL_MISSING");

        assert!(env_bool("HOTELIX_TEST_BOOL_ON", false));
        assert!(!env_bool("HOTELIX_TEST_BOOL_OFF", true));
        assert!(env_bool("HOTELIX_TEST_BOOL_MISSING", true));

        std::env::remove_var("HOTELIX_TEST_BOOL_ON");
        std::env::remove_var("HOTELIX_TEST_BOOL_OFF");
    }

    /// Validates `load_from_env` behavior for the full environment scenario.
    ///
    /// Assertions:
    /// - Confirms every optional variable overrides its default.
    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HOTELIX_DB_PATH", "/tmp/hotelix-test.db");
        std::env::set_var("HOTELIX_DB_POOL_SIZE", "5");
        std::env::set_var("HOTELIX_SEED", "false");
        std::env::set_var("HOTELIX_HOST", "127.0.0.1");
        std::env::set_var("HOTELIX_PORT", "8081");
        std::env::set_var("HOTELIX_CACHE_TTL_MS", "1500");
        std::env::set_var("HOTELIX_CACHE_MAX_SIZE", "20");

        let config = load_from_env();
        clear_env();
        let config = config.expect("config loaded from env");

        assert_eq!(config.database.path, "/tmp/hotelix-test.db");
        assert_eq!(config.database.pool_size, 5);
        assert!(!config.database.seed_defaults);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.cache.ttl_ms, 1500);
        assert_eq!(config.cache.max_size, 20);
    }

    #[test]
    fn test_load_from_env_defaults_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HOTELIX_DB_PATH", "h.db");
        std::env::set_var("HOTELIX_DB_POOL_SIZE", "2");

        let config = load_from_env();
        clear_env();
        let config = config.expect("config loaded from env");

        assert!(config.database.seed_defaults);
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.cache, CacheSettings::default());
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, HotelixError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("HOTELIX_DB_PATH", "h.db");
        std::env::set_var("HOTELIX_DB_POOL_SIZE", "2");
        std::env::set_var("HOTELIX_PORT", "not-a-port");

        let result = load_from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("HOTELIX_PORT"), "unexpected error: {err}");
    }

    #[test]
    fn test_load_from_file_json() {
        let path = temp_config(
            r#"{
                "database": { "path": "test.db", "pool_size": 4 },
                "server": { "host": "localhost", "port": 4000 }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config loaded from JSON");
        std::fs::remove_file(path).ok();

        assert_eq!(config.database.path, "test.db");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.cache, CacheSettings::default());
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = temp_config(
            r#"
[database]
path = "test.db"
pool_size = 6
seed_defaults = false

[cache]
ttl_ms = 500
max_size = 10
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config loaded from TOML");
        std::fs::remove_file(path).ok();

        assert_eq!(config.database.pool_size, 6);
        assert!(!config.database.seed_defaults);
        assert_eq!(config.cache.ttl_ms, 500);
        assert_eq!(config.cache.trim_headroom, 10);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/hotelix.json"))).unwrap_err();
        assert!(matches!(err, HotelixError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = temp_config(r#"{ "this is": "not valid json" "#, "json");

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        assert!(result.is_err(), "Should fail with invalid JSON");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
