//! Stored changes reach the members of the project's room
//!
//! Connections are registered directly on the application's room registry,
//! the same way the socket and SSE transports register them.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_new_message_reaches_only_its_room() {
    let app = TestApp::spawn().await;
    let rooms = &app.state.rooms;

    let (member, mut member_rx) = rooms.connect().unwrap();
    member.join("p1").unwrap();
    let (outsider, mut outsider_rx) = rooms.connect().unwrap();
    outsider.join("p2").unwrap();

    let response = app
        .server
        .post("/messages/send")
        .json(&json!({ "projectID": "p1", "senderID": "u1", "name": "Ada", "message": "hello" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let stored: Value = response.json();

    let frame = member_rx.try_recv().expect("member should get the message");
    assert_eq!(frame.event, "newMessage");
    assert_eq!(frame.data, stored["data"]);
    assert!(outsider_rx.try_recv().is_err());

    // The broadcast message is the stored one
    let listed: Value = app.server.get("/messages/p1").await.json();
    let messages = listed["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["id"], frame.data["id"]);
}

#[tokio::test]
async fn test_file_upload_and_delete_are_broadcast() {
    let app = TestApp::spawn().await;
    let (member, mut rx) = app.state.rooms.connect().unwrap();
    member.join("p1").unwrap();

    let form = MultipartForm::new()
        .add_text("userId", "u1")
        .add_text("userName", "Ada")
        .add_part("file", Part::bytes(b"data".as_slice()).file_name("a.txt").mime_type("text/plain"));
    let body: Value = app.server.post("/files/upload/p1").multipart(form).await.json();
    let id = body["file"]["id"].as_str().unwrap().to_string();

    let uploaded = rx.try_recv().unwrap();
    assert_eq!(uploaded.event, "fileUploaded");
    assert_eq!(uploaded.data["id"], id.as_str());

    app.server
        .delete(&format!("/files/delete/{id}"))
        .await
        .assert_status_ok();
    let deleted = rx.try_recv().unwrap();
    assert_eq!(deleted.event, "fileDeleted");
    assert_eq!(deleted.data, json!(id));
}

#[tokio::test]
async fn test_failed_writes_are_not_broadcast() {
    let app = TestApp::spawn().await;
    let (member, mut rx) = app.state.rooms.connect().unwrap();
    member.join("p1").unwrap();

    app.server
        .post("/messages/send")
        .json(&json!({ "projectID": "p1", "message": "missing sender" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_leaving_and_dropping_end_membership() {
    let app = TestApp::spawn().await;
    let rooms = &app.state.rooms;

    let (first, mut first_rx) = rooms.connect().unwrap();
    first.join("p1").unwrap();
    let (second, _second_rx) = rooms.connect().unwrap();
    second.join("p1").unwrap();
    assert_eq!(rooms.member_count("p1"), 2);

    first.leave("p1").unwrap();
    drop(second);
    assert_eq!(rooms.member_count("p1"), 0);
    assert_eq!(rooms.room_count(), 0);

    app.server
        .post("/messages/send")
        .json(&json!({ "projectID": "p1", "senderID": "u1", "name": "Ada", "message": "anyone?" }))
        .await
        .assert_status(StatusCode::CREATED);
    assert!(first_rx.try_recv().is_err());

    let health: Value = app.server.get("/health").await.json();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["rooms"], 0);
}
