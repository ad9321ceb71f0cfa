//! Liveness and readiness endpoints, mounted outside `/api/v1` and its rate limit

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<StoreChecks>,
}

#[derive(Debug, Serialize)]
pub struct StoreChecks {
    pub storage: StorageStatus,
}

/// Result of pinging the document store
#[derive(Debug, Serialize)]
pub struct StorageStatus {
    pub status: &'static str,
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            checks: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::bare("healthy"))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::bare("alive"))
}

/// 200 `ready` when the store answers, 503 `not_ready` otherwise
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.store();
    let (code, status, storage) = match store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            "ready",
            StorageStatus {
                status: "healthy",
                backend: store.backend_name(),
                message: None,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "not_ready",
            StorageStatus {
                status: "unhealthy",
                backend: store.backend_name(),
                message: Some(e.to_string()),
            },
        ),
    };

    let response = HealthResponse {
        status,
        version: VERSION,
        checks: Some(StoreChecks { storage }),
    };
    (code, Json(response))
}
