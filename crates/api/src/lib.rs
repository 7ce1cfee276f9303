//! # Hotelix API
//!
//! HTTP layer of the Hotelix maintenance backend.
//!
//! This crate contains:
//! - The axum router and one handler module per resource
//! - The application context (dependency injection)
//! - Error-to-response mapping, rejection-aware extractors and request
//!   logging
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires the SQLite repositories into the core services

pub mod context;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;
pub mod utils;

pub use context::AppContext;
pub use error::{ApiError, ApiResult};
pub use server::{build_router, serve};
