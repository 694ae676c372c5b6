//! Integration tests against the real router

pub mod api;
pub mod database;
pub mod realtime;
