//! Application error handling
//!
//! Converts core and adapter errors into HTTP responses with a uniform
//! `{"error": {"code", "message", "field"?}}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fittrack_shared::{CoreError, ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Workout already in progress: {0}")]
    SessionInProgress(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput { field, message } => ApiError::InvalidField { field, message },
            CoreError::Validation(msg) => ApiError::Validation(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::UnknownReference(msg) => ApiError::NotFound(format!("Unknown reference: {}", msg)),
            CoreError::StateInvariant(msg) => ApiError::Conflict(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let (status, code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            ApiError::InvalidField { field: name, message } => {
                let text = format!("Invalid {}: {}", name, message);
                field = Some(name);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", text)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::SessionInProgress(msg) => (StatusCode::CONFLICT, "SESSION_IN_PROGRESS", msg),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Too many requests, slow down".to_string(),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CoreError::invalid_input("weight_kg", "must be greater than zero"), StatusCode::BAD_REQUEST)]
    #[case(CoreError::Validation("age must be a number".into()), StatusCode::BAD_REQUEST)]
    #[case(CoreError::NotFound("set".into()), StatusCode::NOT_FOUND)]
    #[case(CoreError::UnknownReference("food 'x'".into()), StatusCode::NOT_FOUND)]
    #[case(CoreError::StateInvariant("busy".into()), StatusCode::CONFLICT)]
    fn test_core_error_status(#[case] err: CoreError, #[case] status: StatusCode) {
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), status);
    }

    #[test]
    fn test_unauthorized_error_status() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_rate_limit_status() {
        assert_eq!(ApiError::TooManyRequests.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_session_in_progress_status() {
        let response = ApiError::SessionInProgress("Leg day".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
