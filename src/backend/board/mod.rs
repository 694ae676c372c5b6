//! Project Task Boards
//!
//! Each project has one board with four columns (`todo`, `onprogress`,
//! `review`, `done`). Clients always send the whole board; the stored board
//! is replaced wholesale, last writer wins. A client that wants to detect
//! concurrent edits sends `expectedVersion` and gets a 409 when it is stale.
//!
//! # Endpoints
//!
//! - `GET /projects/{projectId}` - columns, version and progress summary
//! - `PATCH /projects/{projectId}` - replace all four columns

pub mod db;
pub mod handlers;

pub use db::{ProjectBoard, Replaced};
pub use handlers::{get_board, replace_columns, BoardView};
