//! Identity routes
//!
//! A session is an opaque owner key plus bearer tokens. There are no
//! credentials; the key itself scopes every stored document.

use crate::error::{ApiError, ApiResult};
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use fittrack_shared::validation::validate_request;
use fittrack_shared::{RefreshRequest, SessionTokens};
use tracing::info;
use uuid::Uuid;

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/refresh", post(refresh_session))
}

/// POST /api/v1/session - Issue a new owner key
async fn create_session(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<SessionTokens>)> {
    let owner_key = Uuid::new_v4().to_string();
    let tokens = state.jwt().issue(&owner_key, false)?;

    info!(owner = %owner_key, "Session created");
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/v1/session/refresh - Rotate tokens
///
/// The onboarding flag is re-read from storage rather than copied from the
/// old token.
async fn refresh_session(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<SessionTokens>> {
    validate_request(&req)?;
    let claims = state
        .jwt()
        .validate_refresh_token(&req.refresh_token)
        .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

    let docs = state.owner_store(&claims.sub);
    let onboarded = ProfileService::has_profile(&docs).await?;
    Ok(Json(state.jwt().issue(&claims.sub, onboarded)?))
}
