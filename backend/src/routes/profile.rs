//! Profile, onboarding and plan routes

use crate::auth::{AuthUser, OnboardedUser};
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::workout_plan::PersonalizedPlan;
use fittrack_shared::{
    NutritionGoals, OnboardingRequest, OnboardingResponse, ProfileResponse, UpdateProfileRequest,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/onboarding", post(onboard))
        .route("/goals", get(get_goals))
        .route("/plan", get(get_plan))
}

/// POST /api/v1/profile/onboarding - Create the profile
///
/// Returns fresh tokens carrying the onboarding flag.
async fn onboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<OnboardingRequest>,
) -> ApiResult<(StatusCode, Json<OnboardingResponse>)> {
    let docs = state.owner_store(&auth.owner_key);
    let response = ProfileService::onboard(&docs, state.jwt(), req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/profile
async fn get_profile(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<ProfileResponse>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProfileService::get_profile(&docs).await?))
}

/// PUT /api/v1/profile - Edit the profile and re-derive goals
async fn update_profile(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProfileService::update_profile(&docs, req, Utc::now()).await?))
}

/// GET /api/v1/profile/goals
async fn get_goals(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<NutritionGoals>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProfileService::goals(&docs).await?))
}

/// GET /api/v1/profile/plan
async fn get_plan(
    State(state): State<AppState>,
    OnboardedUser(auth): OnboardedUser,
) -> ApiResult<Json<PersonalizedPlan>> {
    let docs = state.owner_store(&auth.owner_key);
    Ok(Json(ProfileService::plan(&docs).await?))
}
