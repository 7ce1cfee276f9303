//! Stats cache administration

use axum::extract::State;
use axum::Json;
use hotelix_core::CacheReport;

use super::{ApiResponse, AppState};
use crate::error::ApiResult;
use crate::extract::ApiPath;
use crate::utils::execute_logged;

pub async fn warmup(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<CacheReport>>> {
    execute_logged("admin::cache_warmup", || ctx.cache_manager.warmup(hotel_id)).await?;
    Ok(ApiResponse::with_message(ctx.cache_manager.stats(), "Cache préchauffé"))
}

pub async fn clear(State(ctx): State<AppState>) -> Json<ApiResponse<CacheReport>> {
    ctx.cache_manager.clear_all();
    ApiResponse::with_message(ctx.cache_manager.stats(), "Cache vidé")
}

pub async fn report(State(ctx): State<AppState>) -> Json<ApiResponse<CacheReport>> {
    ApiResponse::ok(ctx.cache_manager.stats())
}
