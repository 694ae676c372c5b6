/**
 * Login Handler
 *
 * This module implements `POST /auth/login`.
 *
 * # Authentication Process
 *
 * 1. Look up user by email (404 if unknown)
 * 2. Verify password using bcrypt (401 if wrong)
 * 3. Return a signed JWT valid for the configured lifetime
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::server::{config::ServerConfig, state::require_pool};

/// Verify a password against a bcrypt hash off the async runtime
pub async fn verify_password(password: String, hash: String) -> BackendResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(BackendError::from)
}

/// Login handler
///
/// # Errors
///
/// * `404 Not Found` - no account with this email
/// * `401 Unauthorized` - the password does not match
/// * `503 Service Unavailable` - the database is not configured
pub async fn login(
    State(pool): State<Option<SqlitePool>>,
    State(config): State<Arc<ServerConfig>>,
    ValidJson(credentials): ValidJson<LoginRequest>,
) -> BackendResult<Json<LoginResponse>> {
    let pool = require_pool(pool)?;
    tracing::info!("[Auth] Login request for: {}", credentials.email);

    let user = get_user_by_email(&pool, &credentials.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] User not found: {}", credentials.email);
            BackendError::not_found("User")
        })?;

    if !verify_password(credentials.password, user.password_hash.clone()).await? {
        tracing::warn!("[Auth] Invalid password for user: {}", user.email);
        return Err(BackendError::unauthorized("Invalid password"));
    }

    let token = sessions::issue_for(&config, &user)?;
    tracing::info!("[Auth] User logged in: {} ({})", user.username, user.email);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
