//! Project Chat HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db::{self, Message, NewMessage};
use crate::backend::error::BackendResult;
use crate::backend::extract::ValidJson;
use crate::backend::realtime::{broadcast_event, RoomRegistry};
use crate::backend::response::DataResponse;
use crate::backend::server::state::require_pool;
use crate::shared::event::FanoutEvent;
use crate::shared::validation::{FieldErrors, Validate, Validated};

/// Longest accepted message body, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Body of `POST /messages/send`
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(rename = "projectID")]
    pub project_id: Option<String>,
    #[serde(rename = "senderID")]
    pub sender_id: Option<String>,
    pub name: Option<String>,
    pub message: Option<String>,
}

impl Validate for SendMessageRequest {
    type Output = NewMessage;

    fn validate(self) -> Validated<NewMessage> {
        let mut errors = FieldErrors::new();
        let project_id = errors.required("projectID", self.project_id.as_deref(), "Project ID is required");
        let sender_id = errors.required("senderID", self.sender_id.as_deref(), "Sender ID is required");
        let name = errors.required("name", self.name.as_deref(), "Name is required");
        let message = errors.bounded("message", self.message.as_deref(), MAX_MESSAGE_CHARS);
        errors.finish(|| NewMessage {
            project_id: project_id.unwrap_or_default(),
            sender_id: sender_id.unwrap_or_default(),
            name: name.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }
}

/// Store a message and broadcast it to the project's room
pub async fn send_message(
    State(pool): State<Option<SqlitePool>>,
    State(rooms): State<RoomRegistry>,
    ValidJson(new): ValidJson<SendMessageRequest>,
) -> BackendResult<(StatusCode, Json<DataResponse<Message>>)> {
    let pool = require_pool(pool)?;

    let message = db::create_message(&pool, new).await?;
    tracing::info!("[Messages] Stored {} in project {}", message.id, message.project_id);

    match FanoutEvent::message_created(&message.project_id, &message) {
        Ok(event) => {
            broadcast_event(&rooms, event);
        }
        Err(e) => tracing::error!("[Messages] Failed to encode newMessage: {:?}", e),
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(message))))
}

/// Message history of a project, oldest first
pub async fn get_messages(
    State(pool): State<Option<SqlitePool>>,
    Path(project_id): Path<String>,
) -> BackendResult<Json<DataResponse<Vec<Message>>>> {
    let pool = require_pool(pool)?;
    let messages = db::get_messages_for_project(&pool, &project_id).await?;
    tracing::debug!("[Messages] {} messages for project {}", messages.len(), project_id);
    Ok(Json(DataResponse::new(messages)))
}
