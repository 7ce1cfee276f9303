//! Configuration loading
//!
//! Builds [`hotelix_domain::Config`] from environment variables, a config
//! file, or the built-in defaults.

pub mod loader;

pub use loader::{find_config_file, load, load_from_env, load_from_file};
