//! Liveness check backed by a database round trip

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use super::AppState;

pub async fn health(State(ctx): State<AppState>) -> Response {
    let db = std::sync::Arc::clone(&ctx.db);
    let check = tokio::task::spawn_blocking(move || db.health_check()).await;

    match check {
        Ok(Ok(())) => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        Ok(Err(err)) => {
            warn!(error = %err, "health check failed");
            let body = json!({ "status": "error", "message": err.message() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "health check task failed");
            let body = json!({ "status": "error", "message": "health check aborted" });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
