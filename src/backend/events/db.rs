//! Database operations for the events board

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, SqlitePool};
use uuid::Uuid;

/// How long an event stays on the board
pub const EVENT_TTL_DAYS: i64 = 7;

/// An announcement on the events board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub username: String,
    pub title: String,
    pub category: String,
    /// Empty when the event has no link
    pub link: String,
    pub description: String,
    /// Image path relative to the public root
    pub image: String,
    pub likes: i64,
    pub liked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
}

/// A validated event ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub username: String,
    pub title: String,
    pub category: String,
    pub link: String,
    pub description: String,
    pub image: String,
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    username: String,
    title: String,
    category: String,
    link: String,
    description: String,
    image: String,
    likes: i64,
    liked_by: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    expire_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            title: row.title,
            category: row.category,
            link: row.link,
            description: row.description,
            image: row.image,
            likes: row.likes,
            liked_by: row.liked_by.0,
            created_at: row.created_at,
            expire_at: row.expire_at,
        }
    }
}

const EVENT_COLUMNS: &str =
    "id, username, title, category, link, description, image, likes, liked_by, created_at, expire_at";

/// Insert an event; it expires [`EVENT_TTL_DAYS`] after creation
pub async fn create_event(pool: &SqlitePool, new: NewEvent) -> Result<Event, sqlx::Error> {
    let created_at = Utc::now();
    let event = Event {
        id: Uuid::new_v4(),
        username: new.username,
        title: new.title,
        category: new.category,
        link: new.link,
        description: new.description,
        image: new.image,
        likes: 0,
        liked_by: Vec::new(),
        created_at,
        expire_at: created_at + Duration::days(EVENT_TTL_DAYS),
    };

    sqlx::query(
        r#"
        INSERT INTO events (id, username, title, category, link, description, image, likes, liked_by, created_at, expire_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(event.id)
    .bind(&event.username)
    .bind(&event.title)
    .bind(&event.category)
    .bind(&event.link)
    .bind(&event.description)
    .bind(&event.image)
    .bind(event.likes)
    .bind(Json(&event.liked_by))
    .bind(event.created_at)
    .bind(event.expire_at)
    .execute(pool)
    .await?;

    Ok(event)
}

/// Events that have not expired at `now`, newest first
pub async fn list_active_events(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE expire_at > ? ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Event::from).collect())
}

/// A single event, unless it is missing or expired
pub async fn get_active_event(
    pool: &SqlitePool,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE id = ? AND expire_at > ?"
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Event::from))
}

/// Delete an event and return what was removed
pub async fn delete_event(pool: &SqlitePool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(&format!(
        "DELETE FROM events WHERE id = ? RETURNING {EVENT_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Event::from))
}

/// Add `username` to the event's likes, or remove it if already present
///
/// `likes` always equals the number of distinct names in `liked_by`. The
/// toggle is one statement, so concurrent likes never upgrade a read lock.
pub async fn toggle_like(
    pool: &SqlitePool,
    id: Uuid,
    username: &str,
    now: DateTime<Utc>,
) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(&format!(
        "UPDATE events SET
             liked_by = CASE
                 WHEN EXISTS (SELECT 1 FROM json_each(events.liked_by) WHERE value = ?1)
                 THEN (SELECT json_group_array(value) FROM json_each(events.liked_by) WHERE value <> ?1)
                 ELSE json_insert(events.liked_by, '$[#]', ?1)
             END,
             likes = CASE
                 WHEN EXISTS (SELECT 1 FROM json_each(events.liked_by) WHERE value = ?1)
                 THEN json_array_length(events.liked_by) - 1
                 ELSE json_array_length(events.liked_by) + 1
             END
         WHERE id = ?2 AND expire_at > ?3
         RETURNING {EVENT_COLUMNS}"
    ))
    .bind(username)
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Event::from))
}

/// Delete every event expired at `now`, returning their image paths
pub async fn purge_expired_events(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("DELETE FROM events WHERE expire_at <= ? RETURNING image")
        .bind(now)
        .fetch_all(pool)
        .await
}
