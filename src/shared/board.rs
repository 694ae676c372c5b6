//! Kanban Board Types
//!
//! A project board is four ordered columns of tasks. Clients always submit
//! the whole board; there is no per-task diff format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::validation::{FieldErrors, Validate, Validated};

/// One of the four board columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardColumn {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "onprogress")]
    OnProgress,
    #[serde(rename = "review")]
    Review,
    #[serde(rename = "done")]
    Done,
}

impl BoardColumn {
    pub const ALL: [BoardColumn; 4] = [
        BoardColumn::Todo,
        BoardColumn::OnProgress,
        BoardColumn::Review,
        BoardColumn::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BoardColumn::Todo => "todo",
            BoardColumn::OnProgress => "onprogress",
            BoardColumn::Review => "review",
            BoardColumn::Done => "done",
        }
    }

    /// Display status fed by column membership. Not a state machine: any
    /// task may sit in any column.
    pub fn status(self) -> TaskStatus {
        match self {
            BoardColumn::Todo => TaskStatus::NotStarted,
            BoardColumn::OnProgress | BoardColumn::Review => TaskStatus::InProgress,
            BoardColumn::Done => TaskStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// A task as stored on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
}

/// The four columns, in board order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub todo: Vec<Task>,
    pub onprogress: Vec<Task>,
    pub review: Vec<Task>,
    pub done: Vec<Task>,
}

impl Columns {
    pub fn column(&self, column: BoardColumn) -> &[Task] {
        match column {
            BoardColumn::Todo => &self.todo,
            BoardColumn::OnProgress => &self.onprogress,
            BoardColumn::Review => &self.review,
            BoardColumn::Done => &self.done,
        }
    }

    /// Aggregate of the status feed, for dashboards
    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        for column in BoardColumn::ALL {
            let count = self.column(column).len();
            match column.status() {
                TaskStatus::NotStarted => progress.not_started += count,
                TaskStatus::InProgress => progress.in_progress += count,
                TaskStatus::Completed => progress.completed += count,
            }
        }
        progress
    }

    pub fn task_count(&self) -> usize {
        BoardColumn::ALL.iter().map(|c| self.column(*c).len()).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// A task as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub id: Option<Uuid>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: Option<bool>,
}

/// Body of a board replacement
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceColumnsRequest {
    #[serde(default)]
    pub todo: Vec<TaskInput>,
    #[serde(default, alias = "inProgress", alias = "in-progress")]
    pub onprogress: Vec<TaskInput>,
    #[serde(default)]
    pub review: Vec<TaskInput>,
    #[serde(default)]
    pub done: Vec<TaskInput>,
    /// When present, the replacement is rejected unless the stored board is
    /// still at this version
    pub expected_version: Option<i64>,
}

/// A validated board replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceColumns {
    pub columns: Columns,
    pub expected_version: Option<i64>,
}

impl Validate for ReplaceColumnsRequest {
    type Output = ReplaceColumns;

    fn validate(self) -> Validated<ReplaceColumns> {
        let mut errors = FieldErrors::new();
        let mut check = |column: BoardColumn, inputs: Vec<TaskInput>| -> Vec<Task> {
            inputs
                .into_iter()
                .enumerate()
                .filter_map(|(index, input)| {
                    let field = format!("{}[{}].description", column.as_str(), index);
                    let description = errors.required(
                        &field,
                        input.description.as_deref(),
                        "Task description is required",
                    )?;
                    Some(Task {
                        id: input.id.unwrap_or_else(Uuid::new_v4),
                        description,
                        assignee: input.assignee.filter(|a| !a.trim().is_empty()),
                        due_date: input.due_date,
                        is_completed: input.is_completed.unwrap_or(false),
                    })
                })
                .collect()
        };

        let columns = Columns {
            todo: check(BoardColumn::Todo, self.todo),
            onprogress: check(BoardColumn::OnProgress, self.onprogress),
            review: check(BoardColumn::Review, self.review),
            done: check(BoardColumn::Done, self.done),
        };
        let expected_version = self.expected_version;
        errors.finish(|| ReplaceColumns {
            columns,
            expected_version,
        })
    }
}
