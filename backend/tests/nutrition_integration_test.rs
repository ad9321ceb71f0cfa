//! Integration tests for daily nutrition logging

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_reading_a_day_returns_empty_log() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;
    let path = format!("/api/v1/nutrition/{}", common::today());

    let (status, body) = app.get_auth(&path, &owner.access_token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log"]["totals"]["calories"], 0.0);
    assert_eq!(body["goals"]["calories"], 1758);
    assert_eq!(body["progress"]["calories_pct"], 0.0);
}

#[tokio::test]
async fn test_add_and_remove_foods() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;
    let path = format!("/api/v1/nutrition/{}/foods", common::today());

    let (status, body) = app
        .post_auth(
            &path,
            &json!({ "food_id": "chicken-breast", "quantity_g": 200.0, "meal_type": "lunch" }),
            &owner.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log"]["totals"]["calories"], 330.0);

    // 1 breast = 172 g
    let (status, body) = app
        .post_auth(
            &path,
            &json!({ "food_id": "chicken-breast", "portion": "1 breast", "meal_type": "dinner" }),
            &owner.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log"]["totals"]["calories"], 614.0);

    let entry_id = body["log"]["meals"]["lunch"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = app
        .delete_auth(&format!("{}/{}", path, entry_id), &owner.access_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log"]["totals"]["calories"], 284.0);
    assert!(body["log"]["meals"]["lunch"].as_array().unwrap().is_empty());

    let (status, _) = app
        .delete_auth(&format!("{}/{}", path, entry_id), &owner.access_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_food_is_not_found() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;
    let path = format!("/api/v1/nutrition/{}/foods", common::today());

    let (status, body) = app
        .post_auth(
            &path,
            &json!({ "food_id": "unicorn-steak", "quantity_g": 100.0, "meal_type": "dinner" }),
            &owner.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_water_and_summary() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;
    let path = format!("/api/v1/nutrition/{}/water", common::today());

    let (status, body) = app
        .post_auth(&path, &json!({ "amount_ml": 750.0 }), &owner.access_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log"]["totals"]["water_ml"], 750.0);

    let (status, summary) = app
        .get_auth("/api/v1/nutrition/summary?days=7", &owner.access_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["days_logged"], 1);
    assert_eq!(summary["average_water_ml"], 750.0);
    assert_eq!(summary["logging_streak"], 1);
}

#[tokio::test]
async fn test_invalid_date_and_window() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;

    let (status, body) = app.get_auth("/api/v1/nutrition/yesterday", &owner.access_token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "date");

    let (status, _) = app
        .get_auth("/api/v1/nutrition/summary?days=0", &owner.access_token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quantity_or_portion_is_required() {
    let app = common::TestApp::new();
    let owner = app.onboarded_owner().await;
    let path = format!("/api/v1/nutrition/{}/foods", common::today());

    let (status, _) = app
        .post_auth(&path, &json!({ "food_id": "apple", "meal_type": "snacks" }), &owner.access_token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
