//! User Profile and Personal Task Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::tasks::{self, PersonalTask};
use crate::backend::auth::users::{self, User};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::extract::ValidJson;
use crate::backend::server::state::require_pool;
use crate::shared::validation::{FieldErrors, Validate, Validated};

/// Parse the path id and make sure the user exists
async fn existing_user(pool: &SqlitePool, user_id: &str) -> BackendResult<Uuid> {
    let id = BackendError::parse_id("User", user_id)?;
    if users::get_user_by_id(pool, id).await?.is_none() {
        return Err(BackendError::not_found("User"));
    }
    Ok(id)
}

fn task_id(errors: &mut FieldErrors, value: Option<&str>) -> Option<Uuid> {
    let parsed = value.and_then(|v| Uuid::parse_str(v.trim()).ok());
    if parsed.is_none() {
        errors.push("taskId", "Invalid task ID");
    }
    parsed
}

/// `GET /users/{id}`
pub async fn fetch_user(
    State(pool): State<Option<SqlitePool>>,
    Path(user_id): Path<String>,
) -> BackendResult<Json<User>> {
    let pool = require_pool(pool)?;
    let id = BackendError::parse_id("User", &user_id)?;
    let user = users::get_user_by_id(&pool, id)
        .await?
        .ok_or(BackendError::not_found("User"))?;
    Ok(Json(user))
}

/// `GET /users/tasks/{id}`
pub async fn fetch_tasks(
    State(pool): State<Option<SqlitePool>>,
    Path(user_id): Path<String>,
) -> BackendResult<Json<Vec<PersonalTask>>> {
    let pool = require_pool(pool)?;
    let id = existing_user(&pool, &user_id).await?;
    Ok(Json(tasks::list_tasks(&pool, id, Utc::now()).await?))
}

/// Body of `POST /users/tasks/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct AddTaskRequest {
    pub description: Option<String>,
}

impl Validate for AddTaskRequest {
    type Output = String;

    fn validate(self) -> Validated<String> {
        let mut errors = FieldErrors::new();
        let description = errors.required(
            "description",
            self.description.as_deref(),
            "Task description is required",
        );
        errors.finish(|| description.unwrap_or_default())
    }
}

/// `POST /users/tasks/{id}`
pub async fn add_task(
    State(pool): State<Option<SqlitePool>>,
    Path(user_id): Path<String>,
    ValidJson(description): ValidJson<AddTaskRequest>,
) -> BackendResult<(StatusCode, Json<PersonalTask>)> {
    let pool = require_pool(pool)?;
    let id = existing_user(&pool, &user_id).await?;
    let task = tasks::add_task(&pool, id, &description).await?;
    tracing::debug!("[Users] Added task {} for {}", task.id, id);
    Ok((StatusCode::CREATED, Json(task)))
}

/// Body of `PATCH /users/tasks/{id}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub task_id: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub task_id: Uuid,
    pub completed: bool,
}

impl Validate for UpdateTaskRequest {
    type Output = TaskCompletion;

    fn validate(self) -> Validated<TaskCompletion> {
        let mut errors = FieldErrors::new();
        let task_id = task_id(&mut errors, self.task_id.as_deref());
        if self.completed.is_none() {
            errors.push("completed", "Completed must be true or false");
        }
        errors.finish(|| TaskCompletion {
            task_id: task_id.unwrap_or_default(),
            completed: self.completed.unwrap_or_default(),
        })
    }
}

/// `PATCH /users/tasks/{id}`: returns the updated list
pub async fn update_task(
    State(pool): State<Option<SqlitePool>>,
    Path(user_id): Path<String>,
    ValidJson(update): ValidJson<UpdateTaskRequest>,
) -> BackendResult<Json<Vec<PersonalTask>>> {
    let pool = require_pool(pool)?;
    let id = existing_user(&pool, &user_id).await?;

    let now = Utc::now();
    if !tasks::set_completion(&pool, id, update.task_id, update.completed, now).await? {
        return Err(BackendError::not_found("Task"));
    }
    Ok(Json(tasks::list_tasks(&pool, id, now).await?))
}

/// Body of `DELETE /users/tasks/{id}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskRequest {
    pub task_id: Option<String>,
}

impl Validate for DeleteTaskRequest {
    type Output = Uuid;

    fn validate(self) -> Validated<Uuid> {
        let mut errors = FieldErrors::new();
        let task_id = task_id(&mut errors, self.task_id.as_deref());
        errors.finish(|| task_id.unwrap_or_default())
    }
}

/// Returned by task deletion
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskResponse {
    pub task_id: Uuid,
    pub tasks: Vec<PersonalTask>,
}

/// `DELETE /users/tasks/{id}`
///
/// Deleting a task that is already gone still returns the remaining list.
pub async fn delete_task(
    State(pool): State<Option<SqlitePool>>,
    Path(user_id): Path<String>,
    ValidJson(task_id): ValidJson<DeleteTaskRequest>,
) -> BackendResult<Json<DeleteTaskResponse>> {
    let pool = require_pool(pool)?;
    let id = existing_user(&pool, &user_id).await?;

    tasks::delete_task(&pool, id, task_id).await?;
    let tasks = tasks::list_tasks(&pool, id, Utc::now()).await?;
    Ok(Json(DeleteTaskResponse { task_id, tasks }))
}
