//! Route definitions for the FitTrack API
//!
//! This module organizes all API routes and applies middleware.

use crate::rate_limit::rate_limit_middleware;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod catalog;
mod health;
mod nutrition;
mod profile;
mod progress;
mod session;
mod workouts;

pub use catalog::catalog_routes;
pub use nutrition::nutrition_routes;
pub use profile::profile_routes;
pub use progress::progress_routes;
pub use session::session_routes;
pub use workouts::workout_routes;

/// Request bodies are small JSON documents
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes, rate limited per client
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "FitTrack API v1" }))
        .nest("/session", session::session_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/catalog", catalog::catalog_routes())
        .nest("/nutrition", nutrition::nutrition_routes())
        .nest("/workouts", workouts::workout_routes())
        .nest("/progress", progress::progress_routes())
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}
