use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::integration::common::{TestApp, setup_test_app};

async fn label_id(app: &TestApp, name: &str) -> i64 {
    app.get("/api/labels")
        .await
        .json()
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == name)
        .and_then(|l| l["id"].as_i64())
        .unwrap()
}

async fn admin_id(app: &TestApp) -> i64 {
    app.get("/api/users").await.json()[0]["id"].as_i64().unwrap()
}

fn ids(tasks: &Value) -> Vec<i64> {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn task_create_uses_wire_field_names() {
    let app = setup_test_app().await;
    let bug = label_id(&app, "bug").await;
    let admin = admin_id(&app).await;

    let response = app
        .post(
            "/api/tasks",
            json!({
                "index": 7,
                "title": "Fix login",
                "content": "Crashes on submit",
                "status": "draft",
                "assignee_id": admin,
                "taskLabelIds": [bug]
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let task = response.json();
    assert_eq!(task["index"], 7);
    assert_eq!(task["title"], "Fix login");
    assert_eq!(task["content"], "Crashes on submit");
    assert_eq!(task["status"], "draft");
    assert_eq!(task["assignee_id"], admin);
    assert_eq!(task["taskLabelIds"], json!([bug]));
    assert!(task["createdAt"].is_string());
}

#[tokio::test]
async fn task_create_rejects_unknown_references() {
    let app = setup_test_app().await;

    let response = app
        .post("/api/tasks", json!({"title": "Orphan", "status": "nope"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "invalid_reference");

    let response = app
        .post(
            "/api/tasks",
            json!({"title": "Orphan", "status": "draft", "taskLabelIds": [999_999]}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/tasks", json!({"title": "", "status": "draft"}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");
}

#[tokio::test]
async fn long_task_title_is_accepted() {
    let app = setup_test_app().await;
    let title = "x".repeat(256);

    let response = app
        .post("/api/tasks", json!({"title": title, "status": "draft"}))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["title"], title);
}

#[tokio::test]
async fn task_update_distinguishes_null_from_missing() {
    let app = setup_test_app().await;
    let bug = label_id(&app, "bug").await;
    let feature = label_id(&app, "feature").await;
    let admin = admin_id(&app).await;

    let created = app
        .post(
            "/api/tasks",
            json!({
                "title": "Refactor",
                "content": "Split module",
                "status": "draft",
                "assignee_id": admin,
                "taskLabelIds": [bug]
            }),
        )
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let response = app
        .put(&format!("/api/tasks/{id}"), json!({"status": "published"}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let task = response.json();
    assert_eq!(task["status"], "published");
    assert_eq!(task["content"], "Split module");
    assert_eq!(task["assignee_id"], admin);
    assert_eq!(task["taskLabelIds"], json!([bug]));

    let response = app
        .put(
            &format!("/api/tasks/{id}"),
            json!({"content": null, "assignee_id": null, "taskLabelIds": [feature]}),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let task = response.json();
    assert!(task["content"].is_null());
    assert!(task["assignee_id"].is_null());
    assert_eq!(task["taskLabelIds"], json!([feature]));

    let response = app
        .put(&format!("/api/tasks/{id}"), json!({"title": null}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn task_list_filters() {
    let app = setup_test_app().await;
    let bug = label_id(&app, "bug").await;
    let admin = admin_id(&app).await;

    let first = app
        .post(
            "/api/tasks",
            json!({"title": "Alpha task", "status": "draft", "assignee_id": admin, "taskLabelIds": [bug]}),
        )
        .await
        .json()["id"]
        .as_i64()
        .unwrap();
    let second = app
        .post("/api/tasks", json!({"title": "Beta task", "status": "published"}))
        .await
        .json()["id"]
        .as_i64()
        .unwrap();

    let response = app.get("/api/tasks").await;
    assert_eq!(response.total_count(), 2);
    assert_eq!(ids(&response.json()), vec![first, second]);

    let response = app.get("/api/tasks?titleCont=Beta").await;
    assert_eq!(ids(&response.json()), vec![second]);
    assert_eq!(response.total_count(), 1);

    let response = app.get(&format!("/api/tasks?assigneeId={admin}")).await;
    assert_eq!(ids(&response.json()), vec![first]);

    let response = app.get("/api/tasks?status=published").await;
    assert_eq!(ids(&response.json()), vec![second]);

    let response = app.get(&format!("/api/tasks?labelId={bug}")).await;
    assert_eq!(ids(&response.json()), vec![first]);

    let response = app.get("/api/tasks?titleCont=&assigneeId=&labelId=").await;
    assert_eq!(response.total_count(), 2);
}

#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let app = setup_test_app().await;
    let bug = label_id(&app, "bug").await;

    let user = app
        .post(
            "/api/users",
            json!({"email": "worker@example.com", "password": "secret"}),
        )
        .await
        .json()["id"]
        .as_i64()
        .unwrap();
    let task = app
        .post(
            "/api/tasks",
            json!({"title": "Busy", "status": "draft", "assignee_id": user, "taskLabelIds": [bug]}),
        )
        .await
        .json()["id"]
        .as_i64()
        .unwrap();

    assert_eq!(
        app.delete(&format!("/api/users/{user}")).await.status,
        StatusCode::CONFLICT
    );
    assert_eq!(
        app.delete(&format!("/api/labels/{bug}")).await.status,
        StatusCode::CONFLICT
    );

    assert_eq!(
        app.delete(&format!("/api/tasks/{task}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete(&format!("/api/labels/{bug}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete(&format!("/api/users/{user}")).await.status,
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn malformed_path_and_query_use_error_body() {
    let app = setup_test_app().await;

    let response = app.get("/api/tasks/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");

    let response = app.get("/api/tasks?assigneeId=abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");

    let response = app.delete("/api/labels/not-a-number").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "validation_error");
}
