//! Internal Mail HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db::{self, MailEntry, MailFolder, NewMail};
use crate::backend::auth::users;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::server::state::require_pool;
use crate::shared::validation::{FieldErrors, Validate, Validated};

/// `{ "success": true, "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailResponse {
    pub success: bool,
    pub message: String,
}

impl MailResponse {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

fn mail_id(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<Uuid> {
    let parsed = value.and_then(|v| Uuid::parse_str(v.trim()).ok());
    if parsed.is_none() {
        errors.push(field, "Invalid email ID format");
    }
    parsed
}

async fn require_user(pool: &SqlitePool, email: &str) -> BackendResult<()> {
    if users::email_exists(pool, email).await? {
        Ok(())
    } else {
        Err(BackendError::not_found("User"))
    }
}

/// Body of `POST /mail/send`
#[derive(Debug, Default, Deserialize)]
pub struct SendMailRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl Validate for SendMailRequest {
    type Output = NewMail;

    fn validate(self) -> Validated<NewMail> {
        let mut errors = FieldErrors::new();
        let from = errors.email("from", self.from.as_deref());
        let to = errors.email("to", self.to.as_deref());
        let subject = errors.required("subject", self.subject.as_deref(), "Subject is required");
        let message = errors.required("message", self.message.as_deref(), "Message is required");
        errors.finish(|| NewMail {
            from: from.unwrap_or_default(),
            to: to.unwrap_or_default(),
            subject: subject.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }
}

/// Deliver a mail to the sender's outbox and the recipient's inbox
pub async fn send_mail(
    State(pool): State<Option<SqlitePool>>,
    ValidJson(mail): ValidJson<SendMailRequest>,
) -> BackendResult<Json<MailResponse>> {
    let pool = require_pool(pool)?;

    if !users::email_exists(&pool, &mail.from).await? || !users::email_exists(&pool, &mail.to).await? {
        tracing::warn!("[Mail] Unknown party in {} -> {}", mail.from, mail.to);
        return Err(BackendError::not_found("User"));
    }

    let (outbox, _) = db::deliver_mail(&pool, mail).await?;
    tracing::info!("[Mail] Delivered {} from {} to {}", outbox.id, outbox.from_email, outbox.to_email);

    Ok(Json(MailResponse::ok("Email sent successfully")))
}

/// Body of `POST /mail/inbox` and `POST /mail/outbox`
#[derive(Debug, Default, Deserialize)]
pub struct MailboxRequest {
    pub email: Option<String>,
}

impl Validate for MailboxRequest {
    type Output = String;

    fn validate(self) -> Validated<String> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        errors.finish(|| email.unwrap_or_default())
    }
}

async fn folder(pool: Option<SqlitePool>, email: &str, folder: MailFolder) -> BackendResult<Vec<MailEntry>> {
    let pool = require_pool(pool)?;
    require_user(&pool, email).await?;
    let entries = db::get_folder(&pool, email, folder).await?;
    tracing::debug!("[Mail] {} entries in {}'s {}", entries.len(), email, folder.as_str());
    Ok(entries)
}

/// A user's inbox, newest first
pub async fn get_inbox(
    State(pool): State<Option<SqlitePool>>,
    ValidJson(email): ValidJson<MailboxRequest>,
) -> BackendResult<Json<Vec<MailEntry>>> {
    Ok(Json(folder(pool, &email, MailFolder::Inbox).await?))
}

/// A user's outbox, newest first
pub async fn get_outbox(
    State(pool): State<Option<SqlitePool>>,
    ValidJson(email): ValidJson<MailboxRequest>,
) -> BackendResult<Json<Vec<MailEntry>>> {
    Ok(Json(folder(pool, &email, MailFolder::Outbox).await?))
}

/// Body of `PATCH /mail/read`
#[derive(Debug, Default, Deserialize)]
pub struct MarkReadRequest {
    pub email: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkRead {
    pub email: String,
    pub id: Uuid,
}

impl Validate for MarkReadRequest {
    type Output = MarkRead;

    fn validate(self) -> Validated<MarkRead> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        let id = mail_id(&mut errors, "id", self.id.as_deref());
        errors.finish(|| MarkRead {
            email: email.unwrap_or_default(),
            id: id.unwrap_or_default(),
        })
    }
}

/// Mark an inbox entry as read
pub async fn mark_as_read(
    State(pool): State<Option<SqlitePool>>,
    ValidJson(request): ValidJson<MarkReadRequest>,
) -> BackendResult<Json<MailResponse>> {
    let pool = require_pool(pool)?;
    require_user(&pool, &request.email).await?;

    if !db::mark_as_read(&pool, &request.email, request.id).await? {
        return Err(BackendError::handler(
            axum::http::StatusCode::NOT_FOUND,
            "Mail not found in inbox",
        ));
    }

    Ok(Json(MailResponse::ok("Email marked as read")))
}

/// Body of `DELETE /mail/delete`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMailRequest {
    pub email: Option<String>,
    pub email_id: Option<String>,
    pub view: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMail {
    pub email: String,
    pub id: Uuid,
    pub view: MailFolder,
}

impl Validate for DeleteMailRequest {
    type Output = DeleteMail;

    fn validate(self) -> Validated<DeleteMail> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        let id = mail_id(&mut errors, "emailId", self.email_id.as_deref());
        let view = self.view.as_deref().and_then(MailFolder::parse);
        if view.is_none() {
            errors.push("view", "View must be either \"inbox\" or \"outbox\"");
        }
        errors.finish(|| DeleteMail {
            email: email.unwrap_or_default(),
            id: id.unwrap_or_default(),
            view: view.unwrap_or(MailFolder::Inbox),
        })
    }
}

/// Remove an entry from one side of a mailbox
///
/// The other party's copy is untouched. Deleting an entry that is already
/// gone still succeeds.
pub async fn delete_mail(
    State(pool): State<Option<SqlitePool>>,
    ValidJson(request): ValidJson<DeleteMailRequest>,
) -> BackendResult<Json<MailResponse>> {
    let pool = require_pool(pool)?;
    require_user(&pool, &request.email).await?;

    let removed = db::delete_entry(&pool, &request.email, request.view, request.id).await?;
    if !removed {
        tracing::debug!("[Mail] {} was not in {}'s {}", request.id, request.email, request.view.as_str());
    }

    Ok(Json(MailResponse::ok("Email deleted successfully")))
}
