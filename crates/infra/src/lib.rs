//! # Hotelix Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for hotels, users, zones and interventions
//! - The database manager, schema and default seed
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `hotelix-core`
//! - Blocking SQLite calls run on `tokio::task::spawn_blocking`

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
