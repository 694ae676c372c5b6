//! Project Chat Module
//!
//! Stores chat messages per project and fans every new message out to the
//! project's room as `newMessage`.
//!
//! # Endpoints
//!
//! - `POST /messages/send` - store and broadcast a message
//! - `GET /messages/{projectID}` - history, oldest first

pub mod db;
pub mod handlers;

pub use db::{Message, NewMessage};
pub use handlers::{get_messages, send_message};
