//! Database operations for project chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A stored chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    #[serde(rename = "projectID")]
    pub project_id: String,
    #[serde(rename = "senderID")]
    pub sender_id: String,
    pub name: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A validated message ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub project_id: String,
    pub sender_id: String,
    pub name: String,
    pub message: String,
}

/// Insert a message and return the stored record
pub async fn create_message(pool: &SqlitePool, new: NewMessage) -> Result<Message, sqlx::Error> {
    let message = Message {
        id: Uuid::new_v4(),
        project_id: new.project_id,
        sender_id: new.sender_id,
        name: new.name,
        message: new.message,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO messages (id, project_id, sender_id, name, message, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(message.id)
    .bind(&message.project_id)
    .bind(&message.sender_id)
    .bind(&message.name)
    .bind(&message.message)
    .bind(message.created_at)
    .execute(pool)
    .await?;

    Ok(message)
}

/// All messages of a project, oldest first
///
/// Messages with the same timestamp come back in insertion order.
pub async fn get_messages_for_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, project_id, sender_id, name, message, created_at
        FROM messages
        WHERE project_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}
