//! Database operations for project boards
//!
//! A board row holds the four columns as JSON documents plus a version that
//! starts at 1 and grows by one on every replacement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, SqlitePool};

use crate::shared::board::{Columns, Task};

/// A project's board as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBoard {
    pub project_id: String,
    #[serde(flatten)]
    pub columns: Columns,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BoardRow {
    project_id: String,
    todo: Json<Vec<Task>>,
    onprogress: Json<Vec<Task>>,
    review: Json<Vec<Task>>,
    done: Json<Vec<Task>>,
    version: i64,
    updated_at: DateTime<Utc>,
}

impl From<BoardRow> for ProjectBoard {
    fn from(row: BoardRow) -> Self {
        Self {
            project_id: row.project_id,
            columns: Columns {
                todo: row.todo.0,
                onprogress: row.onprogress.0,
                review: row.review.0,
                done: row.done.0,
            },
            version: row.version,
            updated_at: row.updated_at,
        }
    }
}

/// Result of a replacement
#[derive(Debug, Clone, PartialEq)]
pub enum Replaced {
    /// The columns were written
    Written(ProjectBoard),
    /// `expected_version` did not match; nothing was written
    Stale { current: Option<i64> },
}

const BOARD_COLUMNS: &str = "project_id, todo, onprogress, review, done, version, updated_at";

pub async fn get_board(pool: &SqlitePool, project_id: &str) -> Result<Option<ProjectBoard>, sqlx::Error> {
    let row = sqlx::query_as::<_, BoardRow>(&format!(
        "SELECT {BOARD_COLUMNS} FROM project_boards WHERE project_id = ?"
    ))
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ProjectBoard::from))
}

async fn current_version(pool: &SqlitePool, project_id: &str) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT version FROM project_boards WHERE project_id = ?")
        .bind(project_id)
        .fetch_optional(pool)
        .await
}

/// Replace all four columns of a project's board
///
/// Without `expected_version` the write always wins and creates the board if
/// needed. With it, the write only happens if the stored version matches;
/// `Some(0)` means "only if the board does not exist yet". Each path is a
/// single statement, so concurrent replacements cannot interleave.
pub async fn replace_columns(
    pool: &SqlitePool,
    project_id: &str,
    columns: &Columns,
    expected_version: Option<i64>,
) -> Result<Replaced, sqlx::Error> {
    let now = Utc::now();

    let sql = match expected_version {
        None => format!(
            "INSERT INTO project_boards (project_id, todo, onprogress, review, done, version, updated_at)
             VALUES (?, ?, ?, ?, ?, 1, ?)
             ON CONFLICT(project_id) DO UPDATE SET
                 todo = excluded.todo,
                 onprogress = excluded.onprogress,
                 review = excluded.review,
                 done = excluded.done,
                 version = project_boards.version + 1,
                 updated_at = excluded.updated_at
             RETURNING {BOARD_COLUMNS}"
        ),
        Some(0) => format!(
            "INSERT INTO project_boards (project_id, todo, onprogress, review, done, version, updated_at)
             VALUES (?, ?, ?, ?, ?, 1, ?)
             ON CONFLICT(project_id) DO NOTHING
             RETURNING {BOARD_COLUMNS}"
        ),
        Some(_) => format!(
            "UPDATE project_boards SET
                 todo = ?2,
                 onprogress = ?3,
                 review = ?4,
                 done = ?5,
                 version = version + 1,
                 updated_at = ?6
             WHERE project_id = ?1 AND version = ?7
             RETURNING {BOARD_COLUMNS}"
        ),
    };

    let mut query = sqlx::query_as::<_, BoardRow>(&sql)
        .bind(project_id)
        .bind(Json(&columns.todo))
        .bind(Json(&columns.onprogress))
        .bind(Json(&columns.review))
        .bind(Json(&columns.done))
        .bind(now);
    if let Some(expected) = expected_version.filter(|v| *v != 0) {
        query = query.bind(expected);
    }

    match query.fetch_optional(pool).await? {
        Some(row) => Ok(Replaced::Written(row.into())),
        None => Ok(Replaced::Stale {
            current: current_version(pool, project_id).await?,
        }),
    }
}
