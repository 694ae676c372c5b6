//! API integration tests
//!
//! One file per resource, each driving the public HTTP surface.

pub mod auth_test;
pub mod board_test;
pub mod events_test;
pub mod files_test;
pub mod mail_test;
pub mod messages_test;
pub mod users_test;
