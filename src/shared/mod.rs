//! Shared Module
//!
//! Types that travel over the wire between the server and its clients:
//! validation outcomes, fan-out events and socket frames, and the project
//! board model. Nothing in here touches the database or the network.

/// Request validation
pub mod validation;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Project task board model
pub mod board;

/// Re-export commonly used types for convenience
pub use board::{BoardColumn, Columns, Progress, Task, TaskStatus};
pub use error::SharedError;
pub use event::{ClientFrame, EventKind, FanoutEvent, ServerFrame};
pub use validation::{FieldError, Validate, Validated};
