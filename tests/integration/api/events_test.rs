//! Campus event feed over HTTP

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn event_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("username", "ada")
        .add_text("title", title)
        .add_text("description", "Pizza and lightning talks")
        .add_text("category", "meetup")
        .add_text("link", "https://example.com/rust-night")
        .add_part("image", Part::bytes(PNG_BYTES).file_name("Poster.PNG").mime_type("image/png"))
}

async fn create(app: &TestApp, title: &str) -> Value {
    let response = app.server.post("/events/create").multipart(event_form(title)).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Event created successfully");
    body["event"].clone()
}

#[tokio::test]
async fn test_create_list_fetch_delete() {
    let app = TestApp::spawn().await;

    let event = create(&app, "Rust night").await;
    let image = event["image"].as_str().unwrap().to_string();
    assert!(image.starts_with("/uploads/"));
    assert!(image.ends_with("-image.png"));
    assert!(app.public_file(&image).exists());
    assert_eq!(event["likes"], 0);
    assert_eq!(event["likedBy"], json!([]));

    create(&app, "Career fair").await;
    let listed: Vec<Value> = app.server.get("/events/get").await.json();
    let titles: Vec<&str> = listed.iter().filter_map(|e| e["title"].as_str()).collect();
    assert_eq!(titles, vec!["Career fair", "Rust night"]);

    let id = event["id"].as_str().unwrap();
    let fetched: Value = app.server.get(&format!("/events/get/{id}")).await.json();
    assert_eq!(fetched["title"], "Rust night");

    let deleted: Value = app.server.delete(&format!("/events/delete/{id}")).await.json();
    assert_eq!(deleted["message"], "Event deleted successfully");
    assert!(!app.public_file(&image).exists());
    app.server
        .get(&format!("/events/get/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .delete(&format!("/events/delete/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_toggles() {
    let app = TestApp::spawn().await;
    let event = create(&app, "Rust night").await;
    let url = format!("/events/like/{}", event["id"].as_str().unwrap());

    let liked: Value = app.server.patch(&url).json(&json!({ "username": "bob" })).await.json();
    assert_eq!(liked["likes"], 1);
    assert_eq!(liked["likedBy"], json!(["bob"]));

    let liked: Value = app.server.patch(&url).json(&json!({ "username": "eve" })).await.json();
    assert_eq!(liked["likes"], 2);

    let unliked: Value = app.server.patch(&url).json(&json!({ "username": "bob" })).await.json();
    assert_eq!(unliked["likes"], 1);
    assert_eq!(unliked["likedBy"], json!(["eve"]));

    let response = app.server.patch(&url).json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_is_required_and_must_be_an_image() {
    let app = TestApp::spawn().await;

    let without_image = MultipartForm::new()
        .add_text("username", "ada")
        .add_text("title", "No poster")
        .add_text("description", "d")
        .add_text("category", "c");
    let response = app.server.post("/events/create").multipart(without_image).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response), vec!["image"]);

    let wrong_type = MultipartForm::new()
        .add_text("username", "ada")
        .add_text("title", "Text poster")
        .add_text("description", "d")
        .add_text("category", "c")
        .add_part("image", Part::bytes(b"hello".as_slice()).file_name("poster.txt").mime_type("text/plain"));
    let response = app.server.post("/events/create").multipart(wrong_type).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["message"], "Only image files are allowed");

    let listed: Vec<Value> = app.server.get("/events/get").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_invalid_fields_discard_the_image() {
    let app = TestApp::spawn().await;
    let form = MultipartForm::new()
        .add_text("username", "ada")
        .add_text("link", "ftp://example.com")
        .add_part("image", Part::bytes(PNG_BYTES).file_name("p.png").mime_type("image/png"));

    let response = app.server.post("/events/create").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let fields = error_fields(&response);
    for field in ["title", "description", "category", "link"] {
        assert!(fields.contains(&field.to_string()), "missing {field} in {fields:?}");
    }

    let images: Vec<_> = std::fs::read_dir(app.public_file("uploads"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .collect();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_malformed_id() {
    let app = TestApp::spawn().await;
    app.server
        .get("/events/get/not-a-uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
