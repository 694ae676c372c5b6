//! Database operations for personal task lists
//!
//! Personal tasks belong to one user and are unrelated to project boards.
//! Completing a task schedules it to expire at the end of that UTC day;
//! expired tasks are hidden immediately and purged by the maintenance loop.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// One entry on a user's personal list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PersonalTask {
    pub id: Uuid,
    pub description: String,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub expire_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 23:59:59.999 UTC on the day of `at`
pub fn end_of_utc_day(at: DateTime<Utc>) -> DateTime<Utc> {
    let last_moment = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    at.date_naive().and_time(last_moment).and_utc()
}

const TASK_COLUMNS: &str = "id, description, is_completed, completed_at, expire_at, created_at";

/// Tasks of a user that have not expired at `now`, oldest first
pub async fn list_tasks(
    pool: &SqlitePool,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Vec<PersonalTask>, sqlx::Error> {
    sqlx::query_as::<_, PersonalTask>(&format!(
        "SELECT {TASK_COLUMNS} FROM user_tasks
         WHERE user_id = ? AND (expire_at IS NULL OR expire_at > ?)
         ORDER BY created_at ASC, rowid ASC"
    ))
    .bind(user_id)
    .bind(now)
    .fetch_all(pool)
    .await
}

pub async fn add_task(
    pool: &SqlitePool,
    user_id: Uuid,
    description: &str,
) -> Result<PersonalTask, sqlx::Error> {
    sqlx::query_as::<_, PersonalTask>(&format!(
        "INSERT INTO user_tasks (id, user_id, description, is_completed, created_at)
         VALUES (?, ?, ?, 0, ?)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Mark a task complete or not; false if the user has no such task
///
/// Completion stamps `completed_at = now` and `expire_at` to the end of the
/// UTC day. Un-completing clears both.
pub async fn set_completion(
    pool: &SqlitePool,
    user_id: Uuid,
    task_id: Uuid,
    completed: bool,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let (completed_at, expire_at) = if completed {
        (Some(now), Some(end_of_utc_day(now)))
    } else {
        (None, None)
    };

    let result = sqlx::query(
        "UPDATE user_tasks SET is_completed = ?, completed_at = ?, expire_at = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(completed)
    .bind(completed_at)
    .bind(expire_at)
    .bind(task_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a task; false if the user has no such task
pub async fn delete_task(pool: &SqlitePool, user_id: Uuid, task_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_tasks WHERE id = ? AND user_id = ?")
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every task expired at `now`
pub async fn purge_expired_tasks(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_tasks WHERE expire_at IS NOT NULL AND expire_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
