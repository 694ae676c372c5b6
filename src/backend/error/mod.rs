//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and From implementations
//! ```
//!
//! # HTTP Response Conversion
//!
//! Every handler returns `Result<_, BackendError>`. The error renders as
//!
//! ```json
//! { "success": false, "error": "Validation failed", "status": 400,
//!   "errors": [{ "field": "title", "message": "Title is required" }] }
//! ```
//!
//! where `errors` only appears for validation failures.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, BackendResult};
