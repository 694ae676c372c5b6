//! Authentication test helpers
//!
//! Create accounts and log in through the public endpoints.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "correct horse battery";

/// A registered account
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub username: String,
}

/// Create an account through `POST /auth/createaccount`
pub async fn create_test_user(server: &TestServer, email: &str) -> TestUser {
    let username = email.split('@').next().unwrap_or(email).to_string();
    let response = server
        .post("/auth/createaccount")
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
            "department": "CSE",
            "skills": ["rust"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"].as_str().unwrap_or_default().to_string(),
        email: email.to_string(),
        username,
    }
}

/// Log in and return the bearer token
pub async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["token"].as_str().unwrap_or_default().to_string()
}
