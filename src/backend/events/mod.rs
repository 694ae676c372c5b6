//! Events Board Module
//!
//! Announcements with an image, visible for seven days after creation.
//!
//! # Endpoints
//!
//! - `POST /events/create` - multipart create
//! - `GET /events/get` - active events, newest first
//! - `GET /events/get/{id}` - one event
//! - `DELETE /events/delete/{id}` - remove the event and its image
//! - `PATCH /events/like/{id}` - toggle a like

pub mod db;
pub mod handlers;

pub use db::{Event, NewEvent, EVENT_TTL_DAYS};
pub use handlers::{create_event, delete_event, get_all_events, get_event_by_id, toggle_like};
