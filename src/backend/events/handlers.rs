//! Events Board HTTP Handlers

use std::io;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::db::{self, Event, NewEvent};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::files::storage::{self, PendingFile};
use crate::backend::response::MessageResponse;
use crate::backend::server::{config::ServerConfig, state::require_pool};
use crate::shared::validation::{FieldErrors, Validate, Validated};

/// Image directory relative to the public root
pub const IMAGES_DIR: &str = "uploads";

/// Body of a successful create
#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    pub message: String,
    pub event: Event,
}

/// Text parts of the create form
#[derive(Debug, Default)]
struct EventForm {
    username: Option<String>,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    link: Option<String>,
}

impl EventForm {
    fn validate(self, image: Option<&PendingFile>, image_error: Option<&'static str>) -> Validated<NewEvent> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", self.username.as_deref(), "Username is required");
        let title = errors.required("title", self.title.as_deref(), "Title is required");
        let description =
            errors.required("description", self.description.as_deref(), "Description is required");
        let category = errors.required("category", self.category.as_deref(), "Category is required");
        let link = errors.optional_url("link", self.link.as_deref());
        match (image, image_error) {
            (_, Some(message)) => errors.push("image", message),
            (None, None) => errors.push("image", "Image is required"),
            (Some(_), None) => {}
        }
        errors.finish(|| NewEvent {
            username: username.unwrap_or_default(),
            title: title.unwrap_or_default(),
            category: category.unwrap_or_default(),
            link: link.unwrap_or_default(),
            description: description.unwrap_or_default(),
            image: image.map(|f| f.public_path().to_string()).unwrap_or_default(),
        })
    }
}

/// `.png`, `.jpg`, ... taken from the uploaded name, or nothing
fn image_extension(file_name: &str) -> String {
    FsPath::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Create an event (multipart: text fields plus an `image`)
pub async fn create_event(
    State(pool): State<Option<SqlitePool>>,
    State(config): State<Arc<ServerConfig>>,
    mut multipart: Multipart,
) -> BackendResult<(StatusCode, Json<CreateEventResponse>)> {
    let pool = require_pool(pool)?;

    let mut form = EventForm::default();
    let mut image: Option<PendingFile> = None;
    let mut image_error = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "image" => {
                let is_image = field
                    .content_type()
                    .is_some_and(|media_type| media_type.starts_with("image/"));
                if !is_image {
                    tracing::warn!("[Events] Rejected non-image upload {:?}", field.content_type());
                    image_error = Some("Only image files are allowed");
                    continue;
                }
                let stored_name = storage::unique_name(&format!(
                    "image{}",
                    image_extension(field.file_name().unwrap_or_default())
                ));
                image = Some(
                    storage::store_field(
                        field,
                        &config.public_dir,
                        IMAGES_DIR,
                        &stored_name,
                        config.max_image_bytes,
                    )
                    .await?,
                );
            }
            "username" => form.username = Some(field.text().await?),
            "title" => form.title = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "category" => form.category = Some(field.text().await?),
            "link" => form.link = Some(field.text().await?),
            other => tracing::debug!("[Events] Ignoring multipart field {:?}", other),
        }
    }

    let new = match form.validate(image.as_ref(), image_error) {
        Validated::Valid(new) => new,
        Validated::Invalid(errors) => return Err(BackendError::validation(errors)),
    };

    let event = db::create_event(&pool, new).await?;
    if let Some(image) = image {
        image.keep();
    }
    tracing::info!("[Events] Created {} by {}", event.id, event.username);

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            message: "Event created successfully".to_string(),
            event,
        }),
    ))
}

/// Active events, newest first
pub async fn get_all_events(
    State(pool): State<Option<SqlitePool>>,
) -> BackendResult<Json<Vec<Event>>> {
    let pool = require_pool(pool)?;
    let events = db::list_active_events(&pool, Utc::now()).await?;
    Ok(Json(events))
}

pub async fn get_event_by_id(
    State(pool): State<Option<SqlitePool>>,
    Path(event_id): Path<String>,
) -> BackendResult<Json<Event>> {
    let pool = require_pool(pool)?;
    let id = BackendError::parse_id("Event", &event_id)?;
    let event = db::get_active_event(&pool, id, Utc::now())
        .await?
        .ok_or(BackendError::not_found("Event"))?;
    Ok(Json(event))
}

/// Delete an event and its image
pub async fn delete_event(
    State(pool): State<Option<SqlitePool>>,
    State(config): State<Arc<ServerConfig>>,
    Path(event_id): Path<String>,
) -> BackendResult<Json<MessageResponse>> {
    let pool = require_pool(pool)?;
    let id = BackendError::parse_id("Event", &event_id)?;

    let event = db::delete_event(&pool, id)
        .await?
        .ok_or(BackendError::not_found("Event"))?;
    tracing::info!("[Events] Deleted {}", event.id);

    match storage::remove_public_file(&config.public_dir, &event.image).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("[Events] Image {} was already gone", event.image);
        }
        Err(e) => {
            return Err(BackendError::PartialFailure(format!(
                "Event deleted but its image could not be removed: {e}"
            )));
        }
    }

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// Body of `PATCH /events/like/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct LikeRequest {
    pub username: Option<String>,
}

impl Validate for LikeRequest {
    type Output = String;

    fn validate(self) -> Validated<String> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", self.username.as_deref(), "Username is required");
        errors.finish(|| username.unwrap_or_default())
    }
}

/// Toggle a user's like on an event
pub async fn toggle_like(
    State(pool): State<Option<SqlitePool>>,
    Path(event_id): Path<String>,
    ValidJson(username): ValidJson<LikeRequest>,
) -> BackendResult<Json<Event>> {
    let pool = require_pool(pool)?;
    let id = BackendError::parse_id("Event", &event_id)?;

    let event = db::toggle_like(&pool, id, &username, Utc::now())
        .await?
        .ok_or(BackendError::not_found("Event"))?;
    tracing::debug!("[Events] {} now has {} likes", event.id, event.likes);
    Ok(Json(event))
}
