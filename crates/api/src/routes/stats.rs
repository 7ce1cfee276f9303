//! Hotel statistics endpoints

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use hotelix_domain::{GlobalStats, InterventionCounts, StatsFilters, StatsPeriod, STATS_PERIODS};
use serde::Deserialize;

use super::technicians::PeriodQuery;
use super::{ApiResponse, AppState};
use crate::error::ApiResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::utils::execute_logged;

/// Query of the counts endpoint. A non-zero `periodDays` takes precedence
/// over the explicit date range.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsQuery {
    #[serde(default)]
    pub technicien_id: Option<i64>,
    #[serde(default)]
    pub period_days: Option<u32>,
    #[serde(default)]
    pub date_debut: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_fin: Option<DateTime<Utc>>,
}

pub async fn global(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<GlobalStats>>> {
    let stats =
        execute_logged("stats::global", || ctx.stats.global_stats(hotel_id, query.period_days))
            .await?;
    Ok(ApiResponse::ok(stats))
}

pub async fn counts(
    State(ctx): State<AppState>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<CountsQuery>,
) -> ApiResult<Json<ApiResponse<InterventionCounts>>> {
    let filters = StatsFilters {
        hotel_id,
        technicien_id: query.technicien_id,
        period_days: query.period_days,
        date_debut: query.date_debut,
        date_fin: query.date_fin,
    };
    let counts =
        execute_logged("stats::counts", || ctx.stats.intervention_counts(filters)).await?;
    Ok(ApiResponse::ok(counts))
}

pub async fn periods() -> Json<ApiResponse<Vec<StatsPeriod>>> {
    ApiResponse::ok(STATS_PERIODS.to_vec())
}
