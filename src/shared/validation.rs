//! Request Validation
//!
//! Every inbound request body is deserialized into a loose "raw" type whose
//! fields are all optional, then validated into a typed request the handlers
//! can trust. Validation never stops at the first problem: all failing fields
//! are collected so the client can fix them in one round trip.
//!
//! ```rust
//! use teamhub::shared::validation::{Validated, FieldErrors};
//!
//! let mut errors = FieldErrors::new();
//! let title = errors.required("title", Some("  Hackathon "), "Title is required");
//! let result = errors.finish(|| title.unwrap_or_default());
//! assert!(matches!(result, Validated::Valid(ref t) if t == "Hackathon"));
//! ```

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A single failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field path, e.g. `email` or `done[0].description`
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating a raw request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(Vec<FieldError>),
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn into_result(self) -> Result<T, SharedError> {
        match self {
            Validated::Valid(value) => Ok(value),
            Validated::Invalid(errors) => Err(SharedError::validation(errors)),
        }
    }
}

/// Implemented by raw request bodies
pub trait Validate {
    /// The typed, already-validated request
    type Output;

    fn validate(self) -> Validated<Self::Output>;
}

/// Accumulates field errors while a raw request is checked
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Trimmed, non-empty text
    pub fn required(&mut self, field: &str, value: Option<&str>, message: &str) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => {
                self.push(field, message);
                None
            }
        }
    }

    /// Trimmed, non-empty text no longer than `max` characters
    pub fn bounded(&mut self, field: &str, value: Option<&str>, max: usize) -> Option<String> {
        let value = self.required(field, value, &format!("{field} is required"))?;
        if value.chars().count() > max {
            self.push(field, format!("{field} must be at most {max} characters"));
            return None;
        }
        Some(value)
    }

    /// Lower-cased, trimmed address with a plausible `local@domain.tld` shape
    pub fn email(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let normalized = value.map(|v| v.trim().to_lowercase());
        match normalized {
            Some(v) if is_plausible_email(&v) => Some(v),
            _ => {
                self.push(field, "Invalid email format");
                None
            }
        }
    }

    /// Raw password, checked for length only
    pub fn password(&mut self, field: &str, value: Option<&str>, min: usize) -> Option<String> {
        match value {
            Some(v) if v.chars().count() >= min => Some(v.to_string()),
            _ => {
                self.push(field, format!("Password must be at least {min} characters long"));
                None
            }
        }
    }

    /// Optional http(s) URL; empty or absent means "no link"
    pub fn optional_url(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let value = value.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Some(String::new());
        }
        if is_http_url(value) {
            Some(value.to_string())
        } else {
            self.push(field, "Invalid URL format");
            None
        }
    }

    /// Returns `Valid(build())` when nothing failed
    pub fn finish<T>(self, build: impl FnOnce() -> T) -> Validated<T> {
        if self.errors.is_empty() {
            Validated::Valid(build())
        } else {
            Validated::Invalid(self.errors)
        }
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn is_http_url(value: &str) -> bool {
    match value.parse::<axum::http::Uri>() {
        Ok(uri) => {
            matches!(uri.scheme_str(), Some("http") | Some("https"))
                && uri.host().is_some_and(|h| h.contains('.') || h == "localhost")
        }
        Err(_) => false,
    }
}
