//! # Hotelix Domain
//!
//! Business domain types and models for Hotelix.
//!
//! This crate contains:
//! - Entities (hotels, users, zones, interventions) and their relation views
//! - Statistics payloads shared by the stats service and the HTTP layer
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Hotelix crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

#[doc(hidden)]
pub use serde as __serde;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
