//! Daily nutrition log routes

use crate::auth::OnboardedUser;
use crate::error::{ApiError, ApiResult};
use crate::services::{NutritionService, WriteContext};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use fittrack_shared::daily_log::LOG_DATE_FORMAT;
use fittrack_shared::stats::NutritionSummary;
use fittrack_shared::validation::validate_request;
use fittrack_shared::{DailyLogResponse, LogFoodRequest, LogWaterRequest, WindowQuery};
use uuid::Uuid;

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/:date", get(get_daily_log))
        .route("/:date/foods", post(add_food))
        .route("/:date/foods/:entry_id", delete(remove_food))
        .route("/:date/water", post(add_water))
        .route("/:date/water/:entry_id", delete(remove_water))
}

/// `YYYY-MM-DD` path segment
fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, LOG_DATE_FORMAT).map_err(|_| ApiError::InvalidField {
        field: "date".to_string(),
        message: format!("'{}' is not a YYYY-MM-DD date", raw),
    })
}

fn write_context(state: &AppState) -> WriteContext {
    WriteContext {
        retention_days: state.config().tracking.retention_days,
        now: Utc::now(),
    }
}

/// GET /api/v1/nutrition/:date
async fn get_daily_log(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyLogResponse>> {
    let date = parse_date(&date)?;
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(NutritionService::daily_view(&docs, date).await?))
}

/// POST /api/v1/nutrition/:date/foods
async fn add_food(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path(date): Path<String>,
    Json(req): Json<LogFoodRequest>,
) -> ApiResult<Json<DailyLogResponse>> {
    let date = parse_date(&date)?;
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(NutritionService::add_food(&docs, date, req, write_context(&state)).await?))
}

/// DELETE /api/v1/nutrition/:date/foods/:entry_id
async fn remove_food(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path((date, entry_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<DailyLogResponse>> {
    let date = parse_date(&date)?;
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(
        NutritionService::remove_food(&docs, date, entry_id, write_context(&state)).await?,
    ))
}

/// POST /api/v1/nutrition/:date/water
async fn add_water(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path(date): Path<String>,
    Json(req): Json<LogWaterRequest>,
) -> ApiResult<Json<DailyLogResponse>> {
    let date = parse_date(&date)?;
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(NutritionService::add_water(&docs, date, req, write_context(&state)).await?))
}

/// DELETE /api/v1/nutrition/:date/water/:entry_id
async fn remove_water(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path((date, entry_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<DailyLogResponse>> {
    let date = parse_date(&date)?;
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(
        NutritionService::remove_water(&docs, date, entry_id, write_context(&state)).await?,
    ))
}

/// GET /api/v1/nutrition/summary?days=
async fn get_summary(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<NutritionSummary>> {
    validate_request(&query)?;
    let days = query
        .days
        .unwrap_or(state.config().tracking.default_stats_window_days);
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(NutritionService::summary(&docs, days, Utc::now()).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert!(matches!(parse_date("09/03/2024"), Err(ApiError::InvalidField { .. })));
        assert!(matches!(parse_date("2024-02-30"), Err(ApiError::InvalidField { .. })));
    }
}
