//! Route handlers grouped by resource

pub mod admin;
pub mod auth;
pub mod health;
pub mod interventions;
pub mod stats;
pub mod technicians;

use std::sync::Arc;

use axum::Json;
use hotelix_domain::Outcome;
use serde::Serialize;

use crate::context::AppContext;

/// Router state shared by every handler.
pub type AppState = Arc<AppContext>;

/// Success envelope: `{ success: true, data, message? }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data, message: None })
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self { success: true, data, message: Some(message.into()) })
    }
}

impl<T> From<Outcome<T>> for ApiResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self { success: true, data: outcome.data, message: Some(outcome.message) }
    }
}
