//! Property-based tests for the board status feed and validation

use proptest::prelude::*;
use teamhub::shared::board::{Columns, ReplaceColumnsRequest, Task, TaskInput};
use teamhub::shared::validation::{Validate, Validated};
use uuid::Uuid;

fn task() -> impl Strategy<Value = Task> {
    ("[a-z ]{1,12}", any::<bool>()).prop_map(|(description, is_completed)| Task {
        id: Uuid::new_v4(),
        description: format!("t {description}"),
        assignee: None,
        due_date: None,
        is_completed,
    })
}

fn columns() -> impl Strategy<Value = Columns> {
    (
        prop::collection::vec(task(), 0..6),
        prop::collection::vec(task(), 0..6),
        prop::collection::vec(task(), 0..6),
        prop::collection::vec(task(), 0..6),
    )
        .prop_map(|(todo, onprogress, review, done)| Columns {
            todo,
            onprogress,
            review,
            done,
        })
}

fn input(description: Option<String>) -> TaskInput {
    TaskInput {
        description,
        ..TaskInput::default()
    }
}

proptest! {
    #[test]
    fn test_progress_counts_match_columns(columns in columns()) {
        let progress = columns.progress();
        prop_assert_eq!(progress.not_started, columns.todo.len());
        prop_assert_eq!(progress.in_progress, columns.onprogress.len() + columns.review.len());
        prop_assert_eq!(progress.completed, columns.done.len());
        prop_assert_eq!(
            progress.not_started + progress.in_progress + progress.completed,
            columns.task_count()
        );
    }

    #[test]
    fn test_progress_ignores_completion_flags(columns in columns()) {
        let mut flipped = columns.clone();
        for task in flipped.todo.iter_mut().chain(flipped.done.iter_mut()) {
            task.is_completed = !task.is_completed;
        }
        prop_assert_eq!(flipped.progress(), columns.progress());
    }

    #[test]
    fn test_every_blank_description_is_reported(
        descriptions in prop::collection::vec(prop::option::of("[a-z ]{0,6}"), 0..8)
    ) {
        let blanks = descriptions
            .iter()
            .filter(|d| d.as_deref().map_or(true, |d| d.trim().is_empty()))
            .count();
        let request = ReplaceColumnsRequest {
            review: descriptions.iter().cloned().map(input).collect(),
            ..ReplaceColumnsRequest::default()
        };

        match request.validate() {
            Validated::Valid(replace) => {
                prop_assert_eq!(blanks, 0);
                prop_assert_eq!(replace.columns.review.len(), descriptions.len());
            }
            Validated::Invalid(errors) => {
                prop_assert_eq!(errors.len(), blanks);
                prop_assert!(errors.iter().all(|e| e.field.starts_with("review[")));
            }
        }
    }
}
