/**
 * Current User and Directory Handlers
 *
 * `GET /auth/me` returns the account behind the bearer token. It sits
 * behind [`auth_middleware`](crate::backend::middleware::auth_middleware),
 * which verifies the token and attaches the caller to the request.
 *
 * `GET /auth/emails` lists every registered email for address completion.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::{self, User};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid token (rejected by the middleware)
/// * `404 Not Found` - the account no longer exists
pub async fn get_me(
    State(pool): State<Option<SqlitePool>>,
    AuthUser(caller): AuthUser,
) -> BackendResult<Json<User>> {
    let pool = require_pool(pool)?;

    let user = users::get_user_by_id(&pool, caller.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] User not found: {}", caller.user_id);
            BackendError::not_found("User")
        })?;

    Ok(Json(user))
}

/// All registered emails
pub async fn get_all_user_emails(
    State(pool): State<Option<SqlitePool>>,
) -> BackendResult<Json<Vec<String>>> {
    let pool = require_pool(pool)?;
    let emails = users::list_emails(&pool).await?;
    tracing::debug!("[Auth] Listing {} emails", emails.len());
    Ok(Json(emails))
}
