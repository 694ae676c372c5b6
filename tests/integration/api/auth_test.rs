//! Account, login and passcode recovery

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_create_account_and_login() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/auth/createaccount")
        .json(&json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": TEST_PASSWORD,
            "department": "cse",
            "role": "faculty",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Account created successfully.");
    assert_eq!(body["user"]["department"], "CSE");
    assert_eq!(body["user"]["isFaculty"], true);
    assert!(body["user"].get("passwordHash").is_none());

    let token = login_token(&app.server, "ada@example.com", TEST_PASSWORD).await;
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::spawn().await;
    create_test_user(&app.server, "ada@example.com").await;

    let response = app
        .server
        .post("/auth/createaccount")
        .json(&json!({ "username": "ada2", "email": "ada@example.com", "password": TEST_PASSWORD }))
        .await;
    assert_error(&response, StatusCode::CONFLICT, "Email already exists");
}

#[tokio::test]
async fn test_create_account_validation() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .post("/auth/createaccount")
        .json(&json!({ "email": "not-an-email", "password": "short", "department": "LAW" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response), vec!["username", "email", "password", "department"]);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::spawn().await;
    create_test_user(&app.server, "ada@example.com").await;

    let unknown = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "bob@example.com", "password": TEST_PASSWORD }))
        .await;
    assert_error(&unknown, StatusCode::NOT_FOUND, "User not found");

    let wrong = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": "wrong password" }))
        .await;
    assert_error(&wrong, StatusCode::UNAUTHORIZED, "Invalid password");
}

#[tokio::test]
async fn test_me_requires_a_token() {
    let app = TestApp::spawn().await;
    let user = create_test_user(&app.server, "ada@example.com").await;

    let anonymous = app.server.get("/auth/me").await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);

    let forged = app
        .server
        .get("/auth/me")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.token"))
        .await;
    forged.assert_status(StatusCode::UNAUTHORIZED);

    let token = login_token(&app.server, &user.email, TEST_PASSWORD).await;
    let me = app
        .server
        .get("/auth/me")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap())
        .await;
    me.assert_status_ok();
    let body: Value = me.json();
    assert_eq!(body["id"], user.id.as_str());
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_emails_lists_every_account() {
    let app = TestApp::spawn().await;
    create_test_user(&app.server, "ada@example.com").await;
    create_test_user(&app.server, "bob@example.com").await;

    let mut emails: Vec<String> = app.server.get("/auth/emails").await.json();
    emails.sort();
    assert_eq!(emails, vec!["ada@example.com", "bob@example.com"]);
}

#[tokio::test]
async fn test_password_recovery_flow() {
    let app = TestApp::spawn().await;
    let user = create_test_user(&app.server, "ada@example.com").await;
    let email = json!({ "email": user.email });

    app.server.post("/auth/checkaccount").json(&email).await.assert_status_ok();

    let early = app
        .server
        .post("/auth/resetpassword")
        .json(&json!({ "email": user.email, "password": "a brand new password" }))
        .await;
    assert_error(&early, StatusCode::UNAUTHORIZED, "OTP verification required");

    app.server.post("/auth/generateotp").json(&email).await.assert_status_ok();
    app.server.post("/auth/resendotp").json(&email).await.assert_status_ok();
    let code = app.state.otp_store.current_code(&user.email).expect("code was issued");
    assert_eq!(code.len(), 6);

    let verified = app
        .server
        .post("/auth/verifyotp")
        .json(&json!({ "email": user.email, "otp": code }))
        .await;
    verified.assert_status_ok();

    // A code is good for one verification only
    let again = app
        .server
        .post("/auth/verifyotp")
        .json(&json!({ "email": user.email, "otp": code }))
        .await;
    assert!(again.status_code().is_client_error());

    app.server
        .post("/auth/resetpassword")
        .json(&json!({ "email": user.email, "password": "a brand new password" }))
        .await
        .assert_status_ok();

    // The grant is spent by the reset
    let replay = app
        .server
        .post("/auth/resetpassword")
        .json(&json!({ "email": user.email, "password": "yet another password" }))
        .await;
    replay.assert_status(StatusCode::UNAUTHORIZED);

    login_token(&app.server, &user.email, "a brand new password").await;
}

#[tokio::test]
async fn test_unknown_account_gets_no_passcode() {
    let app = TestApp::spawn().await;
    let response = app
        .server
        .post("/auth/generateotp")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "User not found");
    assert!(app.state.otp_store.current_code("nobody@example.com").is_none());
}
