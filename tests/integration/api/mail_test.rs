//! Internal mail over HTTP

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

async fn send(app: &TestApp, from: &str, to: &str, subject: &str) {
    let response = app
        .server
        .post("/mail/send")
        .json(&json!({ "from": from, "to": to, "subject": subject, "message": "See attached" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");
}

async fn folder(app: &TestApp, name: &str, email: &str) -> Vec<Value> {
    app.server
        .post(&format!("/mail/{name}"))
        .json(&json!({ "email": email }))
        .await
        .json()
}

#[tokio::test]
async fn test_send_fills_both_folders() {
    let app = TestApp::spawn().await;
    create_test_user(&app.server, "ada@example.com").await;
    create_test_user(&app.server, "bob@example.com").await;

    send(&app, "ada@example.com", "bob@example.com", "Draft 1").await;
    send(&app, "ada@example.com", "bob@example.com", "Draft 2").await;

    let inbox = folder(&app, "inbox", "bob@example.com").await;
    let subjects: Vec<&str> = inbox.iter().filter_map(|m| m["subject"].as_str()).collect();
    assert_eq!(subjects, vec!["Draft 2", "Draft 1"]);
    assert_eq!(inbox[0]["from"], "ada@example.com");
    assert_eq!(inbox[0]["to"], "bob@example.com");
    assert_eq!(inbox[0]["status"], false);

    let outbox = folder(&app, "outbox", "ada@example.com").await;
    assert_eq!(outbox.len(), 2);
    assert!(folder(&app, "inbox", "ada@example.com").await.is_empty());
}

#[tokio::test]
async fn test_unknown_users() {
    let app = TestApp::spawn().await;
    create_test_user(&app.server, "ada@example.com").await;

    let response = app
        .server
        .post("/mail/send")
        .json(&json!({ "from": "ada@example.com", "to": "ghost@example.com", "subject": "s", "message": "m" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    app.server
        .post("/mail/inbox")
        .json(&json!({ "email": "ghost@example.com" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_read_and_delete() {
    let app = TestApp::spawn().await;
    create_test_user(&app.server, "ada@example.com").await;
    create_test_user(&app.server, "bob@example.com").await;
    send(&app, "ada@example.com", "bob@example.com", "Hello").await;

    let inbox = folder(&app, "inbox", "bob@example.com").await;
    let id = inbox[0]["id"].as_str().unwrap().to_string();

    let read: Value = app
        .server
        .patch("/mail/read")
        .json(&json!({ "email": "bob@example.com", "id": id }))
        .await
        .json();
    assert_eq!(read["message"], "Email marked as read");
    assert_eq!(folder(&app, "inbox", "bob@example.com").await[0]["status"], true);

    // The sender's copy is not in an inbox
    let outbox_id = folder(&app, "outbox", "ada@example.com").await[0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let response = app
        .server
        .patch("/mail/read")
        .json(&json!({ "email": "ada@example.com", "id": outbox_id }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Mail not found in inbox");

    let bad_view = app
        .server
        .delete("/mail/delete")
        .json(&json!({ "email": "bob@example.com", "emailId": id, "view": "trash" }))
        .await;
    bad_view.assert_status(StatusCode::BAD_REQUEST);

    let deleted: Value = app
        .server
        .delete("/mail/delete")
        .json(&json!({ "email": "bob@example.com", "emailId": id, "view": "inbox" }))
        .await
        .json();
    assert_eq!(deleted["message"], "Email deleted successfully");
    assert!(folder(&app, "inbox", "bob@example.com").await.is_empty());
    assert_eq!(folder(&app, "outbox", "ada@example.com").await.len(), 1);
}
