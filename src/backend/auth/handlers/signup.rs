/**
 * Account Creation Handler
 *
 * This module implements `POST /auth/createaccount`.
 *
 * # Registration Process
 *
 * 1. Validate every field, reporting all failures at once
 * 2. Reject an email that is already registered (409)
 * 3. Hash the password with bcrypt at the configured cost
 * 4. Store the user and return it without the hash
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{CreateAccountRequest, CreateAccountResponse};
use crate::backend::auth::users::{self, NewUser};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::server::{config::ServerConfig, state::require_pool};

/// Hash a password off the async runtime
pub async fn hash_password(password: String, cost: u32) -> BackendResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(BackendError::from)
}

/// Create account handler
///
/// # Errors
///
/// * `400 Bad Request` - one or more fields failed validation
/// * `409 Conflict` - the email is already registered
/// * `503 Service Unavailable` - the database is not configured
pub async fn create_account(
    State(pool): State<Option<SqlitePool>>,
    State(config): State<Arc<ServerConfig>>,
    ValidJson(account): ValidJson<CreateAccountRequest>,
) -> BackendResult<(StatusCode, Json<CreateAccountResponse>)> {
    let pool = require_pool(pool)?;
    tracing::info!("[Auth] Create account request for {}", account.email);

    if users::email_exists(&pool, &account.email).await? {
        tracing::warn!("[Auth] Email already exists: {}", account.email);
        return Err(BackendError::conflict("Email already exists"));
    }

    let password_hash = hash_password(account.password, config.bcrypt_cost).await?;

    let user = users::create_user(
        &pool,
        NewUser {
            username: account.username,
            email: account.email,
            password_hash,
            department: account.department,
            skills: account.skills,
            role: account.role,
        },
    )
    .await
    .map_err(|e| {
        if users::is_unique_violation(&e) {
            BackendError::conflict("Email already exists")
        } else {
            BackendError::from(e)
        }
    })?;

    tracing::info!("[Auth] Account created: {} ({})", user.username, user.email);

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse {
            message: "Account created successfully.".to_string(),
            user,
        }),
    ))
}
