//! Project file sharing over HTTP

use axum::http::{header::CONTENT_DISPOSITION, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::*;

fn upload_form(name: &str, bytes: &'static [u8]) -> MultipartForm {
    MultipartForm::new()
        .add_text("userId", "u1")
        .add_text("userName", "Ada")
        .add_part("file", Part::bytes(bytes).file_name(name).mime_type("text/plain"))
}

#[tokio::test]
async fn test_upload_list_download_delete() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/files/upload/p1")
        .multipart(upload_form("meeting notes.txt", b"agenda: ship it"))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully");
    let file = &body["file"];
    assert_eq!(file["name"], "meeting notes.txt");
    assert_eq!(file["size"], 15);
    assert_eq!(file["uploader"]["name"], "Ada");

    let id = file["id"].as_str().unwrap().to_string();
    let path = file["path"].as_str().unwrap().to_string();
    assert!(path.starts_with("/uploads/files/"));
    assert!(app.public_file(&path).exists());

    let listed: Vec<Value> = app.server.get("/files/project/p1").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    let download = app.server.get(&format!("/files/download/{id}")).await;
    download.assert_status_ok();
    assert_eq!(download.as_bytes().as_ref(), b"agenda: ship it");
    assert_eq!(
        download.header(CONTENT_DISPOSITION),
        "attachment; filename=\"meeting notes.txt\""
    );

    // Uploads are also reachable as static files
    let served = app.server.get(&path).await;
    served.assert_status_ok();
    assert_eq!(served.text(), "agenda: ship it");

    let deleted: Value = app.server.delete(&format!("/files/delete/{id}")).await.json();
    assert_eq!(deleted["message"], "File deleted successfully");
    assert!(!app.public_file(&path).exists());

    app.server
        .get(&format!("/files/download/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let listed: Vec<Value> = app.server.get("/files/project/p1").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_newest_first() {
    let app = TestApp::spawn().await;
    for name in ["a.txt", "b.txt"] {
        app.server
            .post("/files/upload/p1")
            .multipart(upload_form(name, b"x"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let listed: Vec<Value> = app.server.get("/files/project/p1").await.json();
    let names: Vec<&str> = listed.iter().filter_map(|f| f["name"].as_str()).collect();
    assert_eq!(names, vec!["b.txt", "a.txt"]);
}

#[tokio::test]
async fn test_upload_requires_a_file() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .post("/files/upload/p1")
        .multipart(MultipartForm::new().add_text("userId", "u1").add_text("userName", "Ada"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(error_fields(&response).contains(&"file".to_string()));
}

#[tokio::test]
async fn test_oversized_upload_leaves_nothing_behind() {
    let app = TestApp::spawn_with(|config| config.max_file_bytes = 8).await;
    let response = app
        .server
        .post("/files/upload/p1")
        .multipart(upload_form("big.txt", b"this is more than eight bytes"))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let leftovers = std::fs::read_dir(app.public_file("uploads/files")).unwrap().count();
    assert_eq!(leftovers, 0);
    let listed: Vec<Value> = app.server.get("/files/project/p1").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_missing_bytes_are_not_found() {
    let app = TestApp::spawn().await;
    let body: Value = app
        .server
        .post("/files/upload/p1")
        .multipart(upload_form("gone.txt", b"bye"))
        .await
        .json();
    let path = body["file"]["path"].as_str().unwrap();
    std::fs::remove_file(app.public_file(path)).unwrap();

    let id = body["file"]["id"].as_str().unwrap();
    app.server
        .get(&format!("/files/download/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/files/download/not-a-uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

fn stored_files(app: &TestApp) -> usize {
    std::fs::read_dir(app.public_file("uploads/files")).unwrap().count()
}

#[tokio::test]
async fn test_same_name_uploads_all_succeed() {
    let app = TestApp::spawn().await;
    for _ in 0..20 {
        app.server
            .post("/files/upload/p1")
            .multipart(upload_form("same.txt", b"again"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let listed: Vec<Value> = app.server.get("/files/project/p1").await.json();
    assert_eq!(listed.len(), 20);
    assert_eq!(stored_files(&app), 20);
}

#[tokio::test]
async fn test_rejected_upload_leaves_no_orphan() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .post("/files/upload/p1")
        .multipart(
            MultipartForm::new()
                .add_part("file", Part::bytes(&b"orphan?"[..]).file_name("o.txt").mime_type("text/plain")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let fields = error_fields(&response);
    assert!(fields.contains(&"userId".to_string()));
    assert!(fields.contains(&"userName".to_string()));
    assert_eq!(stored_files(&app), 0);
}

#[tokio::test]
async fn test_store_failure_leaves_no_orphan() {
    let app = TestApp::spawn().await;
    sqlx::query("DROP TABLE files").execute(app.pool()).await.unwrap();

    app.server
        .post("/files/upload/p1")
        .multipart(upload_form("lost.txt", b"never recorded"))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(stored_files(&app), 0);
}
