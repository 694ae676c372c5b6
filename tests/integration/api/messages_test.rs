//! Project chat over HTTP

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

fn message(project: &str, text: &str) -> Value {
    json!({ "projectID": project, "senderID": "u1", "name": "Ada", "message": text })
}

#[tokio::test]
async fn test_send_and_list_in_order() {
    let app = TestApp::spawn().await;

    for text in ["first", "second", "third"] {
        let response = app.server.post("/messages/send").json(&message("p1", text)).await;
        response.assert_status(StatusCode::CREATED);
    }
    app.server.post("/messages/send").json(&message("p2", "elsewhere")).await;

    let body: Value = app.server.get("/messages/p1").await.json();
    assert_eq!(body["success"], true);
    let texts: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["message"].as_str())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_send_validation() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .post("/messages/send")
        .json(&json!({ "projectID": "p1", "message": "hi" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response), vec!["senderID", "name"]);
}

#[tokio::test]
async fn test_malformed_json() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .post("/messages/send")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_without_store() {
    let app = TestApp::without_store().await;
    let response = app.server.post("/messages/send").json(&message("p1", "hi")).await;
    assert_error(&response, StatusCode::SERVICE_UNAVAILABLE, "Database not available");
}
