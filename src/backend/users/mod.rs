//! User Profiles and Personal Tasks
//!
//! # Endpoints
//!
//! - `GET /users/{id}` - profile, without the password hash
//! - `GET /users/tasks/{id}` - personal tasks
//! - `POST /users/tasks/{id}` - `{description}`
//! - `PATCH /users/tasks/{id}` - `{taskId, completed}`
//! - `DELETE /users/tasks/{id}` - `{taskId}`, returns `{taskId, tasks}`

pub mod handlers;
pub mod tasks;

pub use handlers::{add_task, delete_task, fetch_tasks, fetch_user, update_task};
pub use tasks::{end_of_utc_day, PersonalTask};
