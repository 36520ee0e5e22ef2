use axum::http::StatusCode;
use serde_json::json;

use crate::integration::common::setup_test_app;

#[tokio::test]
async fn user_crud_flow() {
    let app = setup_test_app().await;

    let response = app
        .post(
            "/api/users",
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": "secret"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    assert_eq!(created["email"], "jane@example.com");
    assert_eq!(created["firstName"], "Jane");
    assert!(created.get("password").is_none());
    assert!(created.get("passwordDigest").is_none());
    let id = created["id"].as_i64().unwrap();

    let response = app.get("/api/users").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.total_count(), 2);
    assert_eq!(response.json().as_array().unwrap().len(), 2);

    let response = app
        .put(&format!("/api/users/{id}"), json!({"lastName": null}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["firstName"], "Jane");
    assert!(updated["lastName"].is_null());

    let response = app.delete(&format!("/api/users/{id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.get(&format!("/api/users/{id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "not_found");
}

#[tokio::test]
async fn duplicate_email_returns_400() {
    let app = setup_test_app().await;

    let body = json!({"email": "dup@example.com", "password": "secret"});
    assert_eq!(
        app.post("/api/users", body.clone()).await.status,
        StatusCode::CREATED
    );

    let response = app.post("/api/users", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "already_exists");
}

#[tokio::test]
async fn invalid_user_payload_returns_400() {
    let app = setup_test_app().await;

    let response = app
        .post("/api/users", json!({"email": "not-an-email", "password": "secret"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");

    let response = app
        .post("/api/users", json!({"email": "short@example.com", "password": "ab"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn new_user_can_log_in() {
    let app = setup_test_app().await;

    app.post(
        "/api/users",
        json!({"email": "login@example.com", "password": "secret"}),
    )
    .await;

    let response = app
        .send(crate::integration::common::request(
            axum::http::Method::POST,
            "/api/login",
            None,
            Some(json!({"username": "login@example.com", "password": "secret"})),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.text().is_empty());
}
