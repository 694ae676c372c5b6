//! Project boards over HTTP

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_board_round_trip() {
    let app = TestApp::spawn().await;

    app.server.get("/projects/p1").await.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .server
        .patch("/projects/p1")
        .json(&json!({
            "todo": [{ "description": "Write proposal" }, { "description": "Book room" }],
            "inProgress": [{ "description": "Prototype", "assignee": "ada" }],
            "review": [],
            "done": [{ "description": "Form team", "isCompleted": true }],
        }))
        .await;
    response.assert_status_ok();
    let written: Value = response.json();
    assert_eq!(written["version"], 1);
    assert_eq!(written["onprogress"][0]["assignee"], "ada");
    assert!(written["todo"][0]["id"].is_string());

    let board: Value = app.server.get("/projects/p1").await.json();
    assert_eq!(board["projectId"], "p1");
    assert_eq!(board["todo"], written["todo"]);
    assert_eq!(
        board["progress"],
        json!({ "notStarted": 2, "inProgress": 1, "completed": 1 })
    );
}

#[tokio::test]
async fn test_last_writer_wins_and_versions_grow() {
    let app = TestApp::spawn().await;

    for round in 1..=3 {
        let board: Value = app
            .server
            .patch("/projects/p1")
            .json(&json!({ "todo": [{ "description": format!("round {round}") }] }))
            .await
            .json();
        assert_eq!(board["version"], round);
    }

    let board: Value = app.server.get("/projects/p1").await.json();
    assert_eq!(board["todo"].as_array().map(Vec::len), Some(1));
    assert_eq!(board["todo"][0]["description"], "round 3");
}

#[tokio::test]
async fn test_expected_version_rejects_stale_writes() {
    let app = TestApp::spawn().await;

    app.server
        .patch("/projects/p1")
        .json(&json!({ "todo": [{ "description": "a" }], "expectedVersion": 0 }))
        .await
        .assert_status_ok();

    let stale = app
        .server
        .patch("/projects/p1")
        .json(&json!({ "todo": [{ "description": "b" }], "expectedVersion": 0 }))
        .await;
    assert_error(&stale, StatusCode::CONFLICT, "Board has changed; current version is 1");

    let fresh: Value = app
        .server
        .patch("/projects/p1")
        .json(&json!({ "todo": [{ "description": "c" }], "expectedVersion": 1 }))
        .await
        .json();
    assert_eq!(fresh["version"], 2);
    assert_eq!(fresh["todo"][0]["description"], "c");
}

#[tokio::test]
async fn test_tasks_need_descriptions() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .patch("/projects/p1")
        .json(&json!({
            "todo": [{ "description": "fine" }],
            "done": [{ "description": "   " }],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response), vec!["done[0].description"]);
    app.server.get("/projects/p1").await.assert_status(StatusCode::NOT_FOUND);
}
