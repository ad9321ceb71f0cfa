//! Common test utilities for integration tests
//!
//! Every test gets its own router over an in-memory store and limiter.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fittrack_backend::config::AppConfig;
use fittrack_backend::rate_limit::MemoryRateLimiter;
use fittrack_backend::store::MemoryStore;
use fittrack_backend::{routes, state::AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

/// An owner who has finished onboarding
pub struct TestOwner {
    pub owner_key: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryRateLimiter::new()),
            config,
        );
        Self {
            app: routes::create_router(state),
        }
    }

    async fn send(&self, method: &str, path: &str, body: Option<&Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send("GET", path, None, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send("POST", path, Some(body), None).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send("GET", path, None, Some(token)).await
    }

    pub async fn post_auth(&self, path: &str, body: &Value, token: &str) -> (StatusCode, Value) {
        self.send("POST", path, Some(body), Some(token)).await
    }

    pub async fn put_auth(&self, path: &str, body: &Value, token: &str) -> (StatusCode, Value) {
        self.send("PUT", path, Some(body), Some(token)).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.send("DELETE", path, None, Some(token)).await
    }

    /// Issue a session that has not onboarded yet
    pub async fn new_session(&self) -> Value {
        let (status, body) = self.send("POST", "/api/v1/session", None, None).await;
        assert_eq!(status, StatusCode::CREATED, "session: {}", body);
        body
    }

    /// Issue a session and onboard it with the reference profile
    pub async fn onboarded_owner(&self) -> TestOwner {
        let session = self.new_session().await;
        let token = session["access_token"].as_str().unwrap().to_string();

        let (status, body) = self
            .post_auth("/api/v1/profile/onboarding", &onboarding_body(), &token)
            .await;
        assert_eq!(status, StatusCode::CREATED, "onboarding: {}", body);

        TestOwner {
            owner_key: body["session"]["owner_key"].as_str().unwrap().to_string(),
            access_token: body["session"]["access_token"].as_str().unwrap().to_string(),
            refresh_token: body["session"]["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}

/// 25 y male, 170 cm, 70 kg, light activity, weight loss
pub fn onboarding_body() -> Value {
    json!({
        "goal": "weight-loss",
        "sex": "male",
        "age": "25",
        "height_cm": "170",
        "weight_kg": "70",
        "activity_level": "light",
        "experience": "beginner",
        "equipment": ["dumbbells"],
        "training_days_per_week": 3
    })
}

pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.jwt.secret = "test-secret-key-for-testing-only-32chars".to_string();
    config.rate_limit.max_requests = 10_000;
    config
}
