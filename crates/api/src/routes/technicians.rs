//! Technician directory, workload and assignment endpoints

use axum::extract::State;
use axum::Json;
use hotelix_domain::{
    HotelixError, Intervention, TechnicianDetails, TechnicianFilter, TechnicianListItem,
    TechnicianOption, TechnicianStats, TechnicianStatus,
};
use serde::Deserialize;

use super::{ApiResponse, AppState};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::execute_logged;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsQuery {
    pub current_user_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    #[serde(default)]
    pub period_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignToTechnicianBody {
    pub assigned_by: i64,
}

pub async fn list(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiQuery(filter): ApiQuery<TechnicianFilter>,
) -> ApiResult<Json<ApiResponse<Vec<TechnicianListItem>>>> {
    let technicians =
        execute_logged("technicians::list", || ctx.technicians.list(hotel_id, Some(&filter)))
            .await?;
    Ok(ApiResponse::ok(technicians))
}

pub async fn options(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<Vec<TechnicianOption>>>> {
    let options =
        execute_logged("technicians::options", || ctx.interventions.technicians(hotel_id)).await?;
    Ok(ApiResponse::ok(options))
}

pub async fn details(
    State(ctx): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<DetailsQuery>,
) -> ApiResult<Json<ApiResponse<TechnicianDetails>>> {
    let details = execute_logged("technicians::details", || async {
        ctx.technicians
            .get_by_id(id, query.current_user_id)
            .await?
            .ok_or_else(|| HotelixError::NotFound("Technicien non trouvé".into()))
    })
    .await?;
    Ok(ApiResponse::ok(details))
}

pub async fn stats(
    State(ctx): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<TechnicianStats>>> {
    let stats =
        execute_logged("technicians::stats", || ctx.technicians.stats(id, query.period_days))
            .await?;
    Ok(ApiResponse::ok(stats))
}

pub async fn status(
    State(ctx): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<TechnicianStatus>>> {
    let status =
        execute_logged("technicians::status", || ctx.stats.technician_status(id)).await?;
    Ok(ApiResponse::ok(status))
}

pub async fn assign_intervention(
    State(ctx): State<AppState>,
    ApiPath((id, intervention_id)): ApiPath<(i64, i64)>,
    ApiJson(body): ApiJson<AssignToTechnicianBody>,
) -> ApiResult<Json<ApiResponse<Intervention>>> {
    let outcome = execute_logged("technicians::assign_intervention", || {
        ctx.technicians.assign_to_technician(intervention_id, id, body.assigned_by)
    })
    .await?;
    Ok(Json(outcome.into()))
}
