//! Login, registration and hotel listing

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hotelix_domain::{Hotel, LoginRequest, RegisterRequest, UserSession};

use super::{ApiResponse, AppState};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::utils::execute_logged;

pub async fn login(
    State(ctx): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<UserSession>>> {
    let outcome = execute_logged("auth::login", || ctx.auth.login(request)).await?;
    Ok(Json(outcome.into()))
}

pub async fn register(
    State(ctx): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserSession>>)> {
    let outcome = execute_logged("auth::register", || ctx.auth.register(request)).await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn hotels(State(ctx): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<Hotel>>>> {
    let hotels = execute_logged("auth::hotels", || ctx.auth.hotels()).await?;
    Ok(ApiResponse::ok(hotels))
}
