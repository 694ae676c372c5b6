//! Profiles and personal tasks over HTTP

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_profile_hides_the_password_hash() {
    let app = TestApp::spawn().await;
    let user = create_test_user(&app.server, "ada@example.com").await;

    let profile: Value = app.server.get(&format!("/users/{}", user.id)).await.json();
    assert_eq!(profile["email"], "ada@example.com");
    assert_eq!(profile["username"], user.username.as_str());
    assert_eq!(profile["skills"], json!(["rust"]));
    assert!(profile.get("passwordHash").is_none());
    assert!(profile.get("password").is_none());

    app.server.get("/users/nope").await.assert_status(StatusCode::BAD_REQUEST);
    app.server
        .get(&format!("/users/{}", uuid::Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_personal_task_lifecycle() {
    let app = TestApp::spawn().await;
    let user = create_test_user(&app.server, "ada@example.com").await;
    let url = format!("/users/tasks/{}", user.id);

    let tasks: Vec<Value> = app.server.get(&url).await.json();
    assert!(tasks.is_empty());

    let response = app.server.post(&url).json(&json!({ "description": "Read paper" })).await;
    response.assert_status(StatusCode::CREATED);
    let task: Value = response.json();
    assert_eq!(task["isCompleted"], false);
    app.server.post(&url).json(&json!({ "description": "Email TA" })).await;

    let task_id = task["id"].as_str().unwrap();
    let tasks: Vec<Value> = app
        .server
        .patch(&url)
        .json(&json!({ "taskId": task_id, "completed": true }))
        .await
        .json();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["isCompleted"], true);
    let expire_at = tasks[0]["expireAt"].as_str().unwrap();
    assert!(expire_at.contains("T23:59:59.999"), "{expire_at}");

    let deleted: Value = app.server.delete(&url).json(&json!({ "taskId": task_id })).await.json();
    assert_eq!(deleted["taskId"], task_id);
    let remaining: Vec<&str> = deleted["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["description"].as_str())
        .collect();
    assert_eq!(remaining, vec!["Email TA"]);

    app.server
        .patch(&url)
        .json(&json!({ "taskId": task_id, "completed": false }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_validation() {
    let app = TestApp::spawn().await;
    let user = create_test_user(&app.server, "ada@example.com").await;
    let url = format!("/users/tasks/{}", user.id);

    let response = app.server.post(&url).json(&json!({ "description": "  " })).await;
    assert_eq!(error_fields(&response), vec!["description"]);

    let response = app.server.patch(&url).json(&json!({ "taskId": "x" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response), vec!["taskId", "completed"]);

    app.server
        .get(&format!("/users/tasks/{}", uuid::Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
