//! Integration tests for weight logging and achievements

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_logging_weight_updates_goals() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;
    let token = owner.access_token.as_str();

    let (status, entry) = app
        .post_auth("/api/v1/progress/weight", &json!({ "weight_kg": 80.0 }), token)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["weight_kg"], 80.0);

    let (_, profile) = app.get_auth("/api/v1/profile", token).await;
    assert_eq!(profile["profile"]["weight_kg"], 80.0);
    assert_eq!(profile["goals"]["water_ml"], 2800);

    let (status, trend) = app.get_auth("/api/v1/progress/weight?days=30", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trend["entries"], 2);
    assert_eq!(trend["latest_kg"], 80.0);
    assert_eq!(trend["change_kg"], 10.0);
}

#[tokio::test]
async fn test_weight_out_of_range_is_rejected() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;

    let (status, _) = app
        .post_auth("/api/v1/progress/weight", &json!({ "weight_kg": 5.0 }), &owner.access_token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_achievement_table_starts_locked() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;

    let (status, book) = app
        .get_auth("/api/v1/progress/achievements", &owner.access_token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let achievements = book["achievements"].as_array().unwrap();
    assert_eq!(achievements.len(), 8);
    assert!(achievements.iter().all(|a| a["unlocked_at"].is_null()));
}

#[tokio::test]
async fn test_owners_do_not_see_each_other() {
    let app = common::TestApp::new();
    let alice = app.onboarded_owner().await;
    let bob = app.onboarded_owner().await;

    app.post_auth("/api/v1/progress/weight", &json!({ "weight_kg": 90.0 }), &alice.access_token)
        .await;

    let (_, trend) = app
        .get_auth("/api/v1/progress/weight?days=30", &bob.access_token)
        .await;
    assert_eq!(trend["entries"], 1);
    assert_eq!(trend["latest_kg"], 70.0);
}
