//! Project Board Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use super::db::{self, ProjectBoard, Replaced};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::server::state::require_pool;
use crate::shared::board::{Progress, ReplaceColumnsRequest};

/// A board plus its progress summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    #[serde(flatten)]
    pub board: ProjectBoard,
    pub progress: Progress,
}

impl From<ProjectBoard> for BoardView {
    fn from(board: ProjectBoard) -> Self {
        let progress = board.columns.progress();
        Self { board, progress }
    }
}

/// `GET /projects/{projectId}`
pub async fn get_board(
    State(pool): State<Option<SqlitePool>>,
    Path(project_id): Path<String>,
) -> BackendResult<Json<BoardView>> {
    let pool = require_pool(pool)?;
    let board = db::get_board(&pool, &project_id)
        .await?
        .ok_or(BackendError::not_found("Board"))?;
    Ok(Json(board.into()))
}

/// `PATCH /projects/{projectId}`: replace all four columns
pub async fn replace_columns(
    State(pool): State<Option<SqlitePool>>,
    Path(project_id): Path<String>,
    ValidJson(replace): ValidJson<ReplaceColumnsRequest>,
) -> BackendResult<Json<BoardView>> {
    let pool = require_pool(pool)?;

    match db::replace_columns(&pool, &project_id, &replace.columns, replace.expected_version).await? {
        Replaced::Written(board) => {
            tracing::debug!(
                "[Board] {} now at version {} with {} tasks",
                project_id,
                board.version,
                board.columns.task_count()
            );
            Ok(Json(board.into()))
        }
        Replaced::Stale { current } => {
            tracing::info!(
                "[Board] Rejected stale write to {} (expected {:?}, stored {:?})",
                project_id,
                replace.expected_version,
                current
            );
            Err(BackendError::conflict(match current {
                Some(version) => format!("Board has changed; current version is {version}"),
                None => "Board does not exist yet; use expectedVersion 0 to create it".to_string(),
            }))
        }
    }
}
