use axum::http::StatusCode;
use serde_json::json;

use crate::integration::common::setup_test_app;

#[tokio::test]
async fn label_crud_flow() {
    let app = setup_test_app().await;

    let response = app.get("/api/labels").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.total_count(), 2);

    let response = app.post("/api/labels", json!({"name": "urgent"})).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.json()["id"].as_i64().unwrap();

    let response = app
        .put(&format!("/api/labels/{id}"), json!({"name": "critical"}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["name"], "critical");

    let response = app.get(&format!("/api/labels/{id}")).await;
    assert_eq!(response.json()["name"], "critical");

    let response = app.delete(&format!("/api/labels/{id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.delete(&format!("/api/labels/{id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn label_name_rules() {
    let app = setup_test_app().await;

    let response = app.post("/api/labels", json!({"name": "bug"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "already_exists");

    let response = app.post("/api/labels", json!({"name": "ab"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");

    let response = app.post("/api/labels", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = setup_test_app().await;

    let token = app.admin_token();
    let response = app
        .send(
            axum::http::Request::post("/api/labels")
                .header("authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");
}
