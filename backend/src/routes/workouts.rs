//! Workout session routes

use crate::auth::OnboardedUser;
use crate::error::ApiResult;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::stats::WorkoutStats;
use fittrack_shared::validation::validate_request;
use fittrack_shared::workout_session::{ExerciseSession, WorkoutSession, WorkoutSet};
use fittrack_shared::{
    AddExerciseRequest, CompleteWorkoutResponse, HistoryQuery, LogSetRequest, StartWorkoutRequest,
    UpdateSetRequest, WindowQuery,
};
use uuid::Uuid;

const DEFAULT_HISTORY_LIMIT: usize = 20;

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/current",
            post(start_workout).get(get_current).delete(discard_workout),
        )
        .route("/current/exercises", post(add_exercise))
        .route("/current/exercises/:id/sets", post(add_set))
        .route("/current/exercises/:id/sets/:set_id", put(update_set))
        .route("/current/complete", post(complete_workout))
        .route("/history", get(get_history))
        .route("/stats", get(get_stats))
}

/// POST /api/v1/workouts/current - Start a session
async fn start_workout(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Json(req): Json<StartWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<WorkoutSession>)> {
    let docs = state.owner_store(&auth.owner_key);
    let session = WorkoutService::start(&docs, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/workouts/current - Resume the in-progress session
///
/// `null` when nothing is in progress.
async fn get_current(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<Option<WorkoutSession>>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(WorkoutService::current(&docs).await?))
}

/// DELETE /api/v1/workouts/current - Discard without recording
async fn discard_workout(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<StatusCode> {
    let docs = state.owner_store(&auth.owner_key);
    WorkoutService::discard(&docs).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/workouts/current/exercises
async fn add_exercise(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Json(req): Json<AddExerciseRequest>,
) -> ApiResult<(StatusCode, Json<ExerciseSession>)> {
    let docs = state.owner_store(&auth.owner_key);
    let exercise = WorkoutService::add_exercise(&docs, req).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// POST /api/v1/workouts/current/exercises/:id/sets
async fn add_set(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path(exercise_session_id): Path<Uuid>,
    Json(req): Json<LogSetRequest>,
) -> ApiResult<(StatusCode, Json<WorkoutSet>)> {
    let docs = state.owner_store(&auth.owner_key);
    let set = WorkoutService::add_set(&docs, exercise_session_id, req).await?;
    Ok((StatusCode::CREATED, Json(set)))
}

/// PUT /api/v1/workouts/current/exercises/:id/sets/:set_id
async fn update_set(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Path((exercise_session_id, set_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateSetRequest>,
) -> ApiResult<Json<WorkoutSet>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(
        WorkoutService::update_set(&docs, exercise_session_id, set_id, req).await?,
    ))
}

/// POST /api/v1/workouts/current/complete
async fn complete_workout(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<CompleteWorkoutResponse>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(WorkoutService::complete(&docs, Utc::now()).await?))
}

/// GET /api/v1/workouts/history?limit=
async fn get_history(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<WorkoutSession>>> {
    validate_request(&query)?;
    let docs = state.owner_store(&auth.owner_key);
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Ok(Json(WorkoutService::history(&docs, limit).await?))
}

/// GET /api/v1/workouts/stats?days=
async fn get_stats(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<WorkoutStats>> {
    validate_request(&query)?;
    let days = query
        .days
        .unwrap_or(state.config().tracking.default_stats_window_days);
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(WorkoutService::stats(&docs, days, Utc::now()).await?))
}
