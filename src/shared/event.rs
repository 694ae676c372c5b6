/**
 * Real-time Event System
 *
 * This module defines the events that travel over the project socket
 * channel: the fan-out events the server publishes to a project's room, and
 * the control frames a client sends to join or leave rooms.
 *
 * Every frame on the wire has the same envelope:
 *
 * ```json
 * { "event": "newMessage", "data": { ... } }
 * ```
 */
use serde::{Deserialize, Serialize};

/// Kind of project-scoped mutation being announced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A chat message was stored
    MessageCreated,
    /// A file was uploaded to the project
    FileUploaded,
    /// A file was removed from the project
    FileDeleted,
}

impl EventKind {
    /// Event name used on the socket channel
    pub fn wire_name(self) -> &'static str {
        match self {
            EventKind::MessageCreated => "newMessage",
            EventKind::FileUploaded => "fileUploaded",
            EventKind::FileDeleted => "fileDeleted",
        }
    }
}

/// Minimal descriptor handed to the dispatcher after a store write commits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FanoutEvent {
    pub kind: EventKind,
    pub project_id: String,
    pub payload: serde_json::Value,
}

impl FanoutEvent {
    pub fn new(kind: EventKind, project_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind,
            project_id: project_id.into(),
            payload,
        }
    }

    /// `newMessage(Message)`
    pub fn message_created<T: Serialize>(project_id: &str, message: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventKind::MessageCreated, project_id, serde_json::to_value(message)?))
    }

    /// `fileUploaded(FileRecord)`
    pub fn file_uploaded<T: Serialize>(project_id: &str, file: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventKind::FileUploaded, project_id, serde_json::to_value(file)?))
    }

    /// `fileDeleted(fileId)`
    pub fn file_deleted(project_id: &str, file_id: uuid::Uuid) -> Self {
        Self::new(
            EventKind::FileDeleted,
            project_id,
            serde_json::Value::String(file_id.to_string()),
        )
    }
}

/// Frame delivered to a connected client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerFrame {
    pub event: String,
    pub data: serde_json::Value,
}

impl ServerFrame {
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// Control frame sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientFrame {
    JoinProject(String),
    LeaveProject(String),
}
