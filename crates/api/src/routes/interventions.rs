//! Intervention lifecycle endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hotelix_domain::{
    Intervention, InterventionForm, InterventionPatch, InterventionWithRelations, Role, Statut,
    ZoneWithSousZones,
};
use serde::Deserialize;

use super::{ApiResponse, AppState};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::execute_logged;

type InterventionResponse = Json<ApiResponse<Intervention>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub demandeur_id: i64,
    #[serde(flatten)]
    pub form: InterventionForm,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    pub user_id: i64,
    #[serde(flatten)]
    pub patch: InterventionPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatutBody {
    pub statut: Statut,
    pub user_id: i64,
}

/// `technicienId` absent, null or `0` unassigns the ticket.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    #[serde(default)]
    pub technicien_id: Option<i64>,
    pub manager_id: i64,
}

pub async fn list(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<InterventionWithRelations>>>> {
    let interventions = execute_logged("interventions::list", || {
        ctx.interventions.list(hotel_id, query.user_id, query.role)
    })
    .await?;
    Ok(ApiResponse::ok(interventions))
}

pub async fn create(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiJson(body): ApiJson<CreateBody>,
) -> ApiResult<(StatusCode, InterventionResponse)> {
    let outcome = execute_logged("interventions::create", || {
        ctx.interventions.create(body.form, body.demandeur_id, hotel_id)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn update(
    State(ctx): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateBody>,
) -> ApiResult<InterventionResponse> {
    let outcome = execute_logged("interventions::update", || {
        ctx.interventions.update(id, body.patch, body.user_id)
    })
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn update_statut(
    State(ctx): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<StatutBody>,
) -> ApiResult<InterventionResponse> {
    let outcome = execute_logged("interventions::update_statut", || {
        ctx.interventions.update_statut(id, body.statut, body.user_id)
    })
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn assign(
    State(ctx): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AssignBody>,
) -> ApiResult<InterventionResponse> {
    let technician_id = body.technicien_id.unwrap_or(0);
    let outcome = execute_logged("interventions::assign", || {
        ctx.interventions.assign(id, technician_id, body.manager_id)
    })
    .await?;
    Ok(Json(outcome.into()))
}

pub async fn zones(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<Vec<ZoneWithSousZones>>>> {
    let zones =
        execute_logged("interventions::zones", || ctx.interventions.zones(hotel_id)).await?;
    Ok(ApiResponse::ok(zones))
}

pub async fn available(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<Vec<InterventionWithRelations>>>> {
    let available = execute_logged("interventions::available", || {
        ctx.technicians.available_interventions(hotel_id)
    })
    .await?;
    Ok(ApiResponse::ok(available))
}
