/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be returned directly from handlers.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "success": false,
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    extract::multipart::MultipartError,
    response::{IntoResponse, Response},
    Json,
};

use axum::http::StatusCode;

use crate::backend::auth::mailer::MailerError;
use crate::backend::auth::otp::OtpError;
use crate::backend::error::types::BackendError;
use crate::backend::realtime::rooms::RoomError;

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side failures are logged here so handlers can stay on `?`.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("[Error] {} -> {}", status, self);
        } else {
            tracing::debug!("[Error] {} -> {}", status, self);
        }

        let mut body = serde_json::json!({
            "success": false,
            "error": self.message(),
            "status": status.as_u16(),
        });
        let errors = self.field_errors();
        if !errors.is_empty() {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::handler(status, err.body_text())
        } else {
            Self::MalformedBody(err.body_text())
        }
    }
}

impl From<RoomError> for BackendError {
    fn from(err: RoomError) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<OtpError> for BackendError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::Missing | OtpError::Expired => Self::handler(StatusCode::BAD_REQUEST, err.to_string()),
            OtpError::Mismatch { .. } | OtpError::Exhausted => Self::unauthorized(err.to_string()),
            OtpError::Poisoned => Self::handler(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl From<MailerError> for BackendError {
    fn from(err: MailerError) -> Self {
        Self::Mail(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("[Error] Password hashing failed: {:?}", err);
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
