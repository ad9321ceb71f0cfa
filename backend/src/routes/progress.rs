//! Records, achievements and body weight routes

use crate::auth::OnboardedUser;
use crate::error::ApiResult;
use crate::services::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::records::{AchievementBook, PersonalRecordBook};
use fittrack_shared::stats::WeightTrend;
use fittrack_shared::validation::validate_request;
use fittrack_shared::{LogWeightRequest, WeightEntry, WindowQuery};

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(get_records))
        .route("/achievements", get(get_achievements))
        .route("/weight", get(get_weight_trend).post(log_weight))
}

/// GET /api/v1/progress/records
async fn get_records(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<PersonalRecordBook>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProgressService::records(&docs).await?))
}

/// GET /api/v1/progress/achievements
async fn get_achievements(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<AchievementBook>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProgressService::achievements(&docs).await?))
}

/// POST /api/v1/progress/weight
async fn log_weight(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<(StatusCode, Json<WeightEntry>)> {
    let docs = state.owner_store(&auth.owner_key);
    let retention_days = state.config().tracking.retention_days;
    let entry = ProgressService::log_weight(&docs, req, retention_days, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/progress/weight?days=
async fn get_weight_trend(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<WeightTrend>> {
    validate_request(&query)?;
    let days = query
        .days
        .unwrap_or(state.config().tracking.default_stats_window_days);
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProgressService::weight_trend(&docs, days, Utc::now()).await?))
}
