//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A test application over an in-memory database and a temporary public root
//! - Authentication test helpers
//! - Custom assertion helpers

pub mod app;
pub mod assertions;
pub mod auth_helpers;

// Re-export commonly used utilities
pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
