//! Project Files HTTP Handlers

use std::io;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Request, State},
    http::{header::CONTENT_DISPOSITION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use uuid::Uuid;

use super::db::{self, FileRecord, Uploader};
use super::storage::{self, PendingFile};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::realtime::{broadcast_event, RoomRegistry};
use crate::backend::response::MessageResponse;
use crate::backend::server::{config::ServerConfig, state::require_pool};
use crate::shared::event::FanoutEvent;
use crate::shared::validation::{FieldErrors, Validated};

/// Upload directory relative to the public root
pub const FILES_DIR: &str = "uploads/files";

/// Body of a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file: FileRecord,
}

struct ReceivedFile {
    pending: PendingFile,
    name: String,
    media_type: String,
}

/// Upload a file to a project (multipart: `file`, `userId`, `userName`)
pub async fn upload_file(
    State(pool): State<Option<SqlitePool>>,
    State(rooms): State<RoomRegistry>,
    State(config): State<Arc<ServerConfig>>,
    Path(project_id): Path<String>,
    mut multipart: Multipart,
) -> BackendResult<(StatusCode, Json<UploadResponse>)> {
    let pool = require_pool(pool)?;

    let mut received: Option<ReceivedFile> = None;
    let mut user_id = None;
    let mut user_name = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let name = field.file_name().unwrap_or("file").to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let stored_name = storage::unique_name(&storage::sanitize_filename(&name));
                let pending = storage::store_field(
                    field,
                    &config.public_dir,
                    FILES_DIR,
                    &stored_name,
                    config.max_file_bytes,
                )
                .await?;
                received = Some(ReceivedFile {
                    pending,
                    name,
                    media_type,
                });
            }
            "userId" => user_id = Some(field.text().await?),
            "userName" => user_name = Some(field.text().await?),
            other => tracing::debug!("[Files] Ignoring multipart field {:?}", other),
        }
    }

    let mut errors = FieldErrors::new();
    if received.is_none() {
        errors.push("file", "No file uploaded");
    }
    let user_id = errors.required("userId", user_id.as_deref(), "User ID is required");
    let user_name = errors.required("userName", user_name.as_deref(), "User name is required");
    let validated = errors.finish(|| Uploader {
        id: user_id.unwrap_or_default(),
        name: user_name.unwrap_or_default(),
    });

    let (uploader, received) = match (validated, received) {
        (Validated::Valid(uploader), Some(received)) => (uploader, received),
        (Validated::Invalid(errors), _) => return Err(BackendError::validation(errors)),
        (Validated::Valid(_), None) => {
            return Err(BackendError::invalid_field("file", "No file uploaded"))
        }
    };

    let record = FileRecord {
        id: Uuid::new_v4(),
        project_id,
        name: received.name,
        media_type: received.media_type,
        size: i64::try_from(received.pending.size()).unwrap_or(i64::MAX),
        path: received.pending.public_path().to_string(),
        uploader,
        uploaded_at: Utc::now(),
    };

    // A failed insert drops the guard, which removes the bytes
    db::create_file(&pool, &record).await?;
    received.pending.keep();
    tracing::info!(
        "[Files] Stored {} ({} bytes) for project {}",
        record.path,
        record.size,
        record.project_id
    );

    match FanoutEvent::file_uploaded(&record.project_id, &record) {
        Ok(event) => {
            broadcast_event(&rooms, event);
        }
        Err(e) => tracing::error!("[Files] Failed to encode fileUploaded: {:?}", e),
    }

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file: record,
        }),
    ))
}

/// Files of a project, newest first
pub async fn get_project_files(
    State(pool): State<Option<SqlitePool>>,
    Path(project_id): Path<String>,
) -> BackendResult<Json<Vec<FileRecord>>> {
    let pool = require_pool(pool)?;
    let files = db::get_files_for_project(&pool, &project_id).await?;
    Ok(Json(files))
}

/// Download a file as an attachment
pub async fn download_file(
    State(pool): State<Option<SqlitePool>>,
    State(config): State<Arc<ServerConfig>>,
    Path(file_id): Path<String>,
    request: Request,
) -> BackendResult<Response> {
    let pool = require_pool(pool)?;
    let id = BackendError::parse_id("File", &file_id)?;

    let file = db::get_file_by_id(&pool, id)
        .await?
        .ok_or(BackendError::not_found("File"))?;

    let path = storage::resolve_public_path(&config.public_dir, &file.path)
        .ok_or(BackendError::not_found("File"))?;
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        tracing::warn!("[Files] Record {} points at missing bytes {}", file.id, path.display());
        return Err(BackendError::not_found("File"));
    }

    let mut response = ServeFile::new(&path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
        .into_response();
    response
        .headers_mut()
        .insert(CONTENT_DISPOSITION, attachment_header(&file.name));
    Ok(response)
}

fn attachment_header(name: &str) -> HeaderValue {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' || c == ' ' { c } else { '_' })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Delete a file record and its bytes
///
/// The record goes first. If the bytes then cannot be removed, the call
/// reports a partial failure; missing bytes are not an error.
pub async fn delete_file(
    State(pool): State<Option<SqlitePool>>,
    State(rooms): State<RoomRegistry>,
    State(config): State<Arc<ServerConfig>>,
    Path(file_id): Path<String>,
) -> BackendResult<Json<MessageResponse>> {
    let pool = require_pool(pool)?;
    let id = BackendError::parse_id("File", &file_id)?;

    let file = db::delete_file(&pool, id)
        .await?
        .ok_or(BackendError::not_found("File"))?;
    tracing::info!("[Files] Deleted record {} from project {}", file.id, file.project_id);

    broadcast_event(&rooms, FanoutEvent::file_deleted(&file.project_id, file.id));

    match storage::remove_public_file(&config.public_dir, &file.path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("[Files] Bytes for {} were already gone", file.path);
        }
        Err(e) => {
            return Err(BackendError::PartialFailure(format!(
                "File record deleted but its bytes could not be removed: {e}"
            )));
        }
    }

    Ok(Json(MessageResponse::new("File deleted successfully")))
}
