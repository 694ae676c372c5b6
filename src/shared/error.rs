//! Shared Error Types
//!
//! This module defines the error types shared by the HTTP layer and the
//! domain types that are serialized over the wire.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - One or more request fields failed validation
//!
//! # Usage
//!
//! ```rust
//! use teamhub::shared::error::SharedError;
//! use teamhub::shared::validation::FieldError;
//!
//! let error = SharedError::validation(vec![FieldError::new("email", "Invalid email format")]);
//! assert!(error.to_string().contains("email"));
//! ```
use thiserror::Error;

use crate::shared::validation::FieldError;

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error, one entry per offending field
    #[error("Validation failed: {}", summarize(.errors))]
    ValidationError {
        /// Every field that failed, in request order
        errors: Vec<FieldError>,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
