/**
 * Backend Error Types
 *
 * This module defines the single error type every HTTP handler returns.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - Field validation failures (one entry per offending field)
 * - Malformed identifiers and unparseable bodies
 * - Unknown records, bad credentials, duplicate emails, stale board versions
 * - Uploads over the configured size limit
 *
 * ## Server Errors
 *
 * - Store, filesystem, token and mail delivery failures
 * - Store not configured (`DATABASE_URL` unset)
 * - A record deleted whose bytes could not be removed
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::validation::FieldError;
use crate::shared::SharedError;

/// Result alias used by handlers and db helpers
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend-specific error types
///
/// Each variant maps to exactly one HTTP status, see [`BackendError::status_code`].
///
/// # Usage
///
/// ```rust
/// use teamhub::backend::error::BackendError;
///
/// let err = BackendError::not_found("File");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation {
        /// Every failing field, in request order
        errors: Vec<FieldError>,
    },

    /// A path identifier that should be a UUID is not one
    #[error("Invalid {entity} id: {value}")]
    MalformedId {
        entity: &'static str,
        value: String,
    },

    /// The request body could not be parsed at all
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The addressed record does not exist
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Credentials or token rejected
    #[error("{0}")]
    Unauthorized(String),

    /// The write conflicts with existing state
    #[error("{0}")]
    Conflict(String),

    /// An upload exceeded its size limit
    #[error("Payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: u64 },

    /// The store is not configured
    #[error("Database not available")]
    Unavailable,

    /// The record was removed but a side effect was not
    #[error("{0}")]
    PartialFailure(String),

    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    Handler {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Store failure
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Mail delivery failure
    #[error("Mail delivery failed: {0}")]
    Mail(String),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Single-field validation failure
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Parse a path segment as a UUID
    ///
    /// ```rust
    /// use teamhub::backend::error::BackendError;
    ///
    /// assert!(BackendError::parse_id("File", "not-a-uuid").is_err());
    /// ```
    pub fn parse_id(entity: &'static str, value: &str) -> Result<uuid::Uuid, Self> {
        uuid::Uuid::parse_str(value).map_err(|_| Self::MalformedId {
            entity,
            value: value.to_string(),
        })
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `MalformedId`, `MalformedBody` - 400 Bad Request
    /// - `Unauthorized` - 401
    /// - `NotFound` - 404
    /// - `Conflict` - 409
    /// - `PayloadTooLarge` - 413
    /// - `Unavailable` - 503
    /// - `Handler` - Uses the status code from the error
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::MalformedId { .. } | Self::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Handler { status, .. } => *status,
            Self::PartialFailure(_)
            | Self::Store(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Token(_)
            | Self::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal failures are not echoed to the client verbatim.
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) | Self::Io(_) | Self::Serialization(_) | Self::Token(_) => {
                "Internal server error".to_string()
            }
            Self::Handler { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Field errors for the `errors` array, empty unless this is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { errors } => Self::Validation { errors },
            SharedError::SerializationError { message } => Self::MalformedBody(message),
        }
    }
}
