/**
 * Password Recovery Handlers
 *
 * `checkaccount`, `generateotp`, `resendotp`, `verifyotp` and
 * `resetpassword`.
 *
 * # Recovery Flow
 *
 * 1. `generateotp` issues a 6-digit code and mails it
 * 2. `verifyotp` consumes the code and grants one password reset
 * 3. `resetpassword` consumes the grant and stores the new hash
 *
 * Resetting without a verified code is rejected with 401.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::signup::hash_password;
use crate::backend::auth::handlers::types::{
    EmailRequest, ResetPasswordRequest, VerifyOtpRequest,
};
use crate::backend::auth::mailer::{Delivery, Mailer};
use crate::backend::auth::otp::OtpStore;
use crate::backend::auth::users;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::response::MessageResponse;
use crate::backend::server::{config::ServerConfig, state::require_pool};

async fn require_account(pool: &SqlitePool, email: &str) -> BackendResult<()> {
    if users::email_exists(pool, email).await? {
        Ok(())
    } else {
        tracing::warn!("[Auth] No user found with email {}", email);
        Err(BackendError::not_found("User"))
    }
}

/// `POST /auth/checkaccount`
pub async fn check_account(
    State(pool): State<Option<SqlitePool>>,
    ValidJson(email): ValidJson<EmailRequest>,
) -> BackendResult<Json<MessageResponse>> {
    let pool = require_pool(pool)?;
    require_account(&pool, &email).await?;
    Ok(Json(MessageResponse::new(
        "Account exists. Proceed to reset password.",
    )))
}

async fn send_code(
    pool: Option<SqlitePool>,
    otp_store: &OtpStore,
    mailer: &Mailer,
    email: &str,
    resend: bool,
) -> BackendResult<()> {
    let pool = require_pool(pool)?;
    require_account(&pool, email).await?;

    let code = otp_store.issue(email)?;
    match mailer.send_passcode(email, &code, resend).await? {
        Delivery::Sent => tracing::info!("[Auth] Passcode mailed to {}", email),
        Delivery::Skipped => tracing::info!("[Auth] Passcode issued for {} (mail disabled)", email),
    }
    Ok(())
}

/// `POST /auth/generateotp`
pub async fn generate_otp(
    State(pool): State<Option<SqlitePool>>,
    State(otp_store): State<OtpStore>,
    State(mailer): State<Mailer>,
    ValidJson(email): ValidJson<EmailRequest>,
) -> BackendResult<Json<MessageResponse>> {
    send_code(pool, &otp_store, &mailer, &email, false).await?;
    Ok(Json(MessageResponse::new("OTP sent successfully")))
}

/// `POST /auth/resendotp`
pub async fn resend_otp(
    State(pool): State<Option<SqlitePool>>,
    State(otp_store): State<OtpStore>,
    State(mailer): State<Mailer>,
    ValidJson(email): ValidJson<EmailRequest>,
) -> BackendResult<Json<MessageResponse>> {
    send_code(pool, &otp_store, &mailer, &email, true).await?;
    Ok(Json(MessageResponse::new("OTP resent successfully")))
}

/// `POST /auth/verifyotp`
///
/// A missing or expired code is a 400; a wrong code is a 401.
pub async fn verify_otp(
    State(otp_store): State<OtpStore>,
    ValidJson(submission): ValidJson<VerifyOtpRequest>,
) -> BackendResult<Json<MessageResponse>> {
    otp_store.verify(&submission.email, &submission.otp).map_err(|e| {
        tracing::warn!("[Auth] Passcode rejected for {}: {}", submission.email, e);
        BackendError::from(e)
    })?;
    tracing::info!("[Auth] Passcode verified for {}", submission.email);
    Ok(Json(MessageResponse::new("OTP verified successfully")))
}

/// `POST /auth/resetpassword`
pub async fn reset_password(
    State(pool): State<Option<SqlitePool>>,
    State(otp_store): State<OtpStore>,
    State(config): State<Arc<ServerConfig>>,
    ValidJson(credentials): ValidJson<ResetPasswordRequest>,
) -> BackendResult<Json<MessageResponse>> {
    let pool = require_pool(pool)?;

    if !otp_store.take_reset_grant(&credentials.email)? {
        tracing::warn!("[Auth] Reset without verified passcode for {}", credentials.email);
        return Err(BackendError::unauthorized("OTP verification required"));
    }

    let password_hash = hash_password(credentials.password, config.bcrypt_cost).await?;
    if !users::update_password(&pool, &credentials.email, &password_hash).await? {
        return Err(BackendError::not_found("User"));
    }

    tracing::info!("[Auth] Password reset for {}", credentials.email);
    Ok(Json(MessageResponse::new("Password reset successful")))
}
