//! Backend Module
//!
//! This module contains all server-side code for TeamHub: an Axum HTTP
//! server with SQLite persistence and real-time fan-out to project rooms.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration, maintenance
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`realtime`** - Room registry, socket and SSE endpoints, fan-out dispatcher
//! - **`board`** - Per-project kanban boards
//! - **`messaging`** - Project chat
//! - **`files`** - Project file uploads and downloads
//! - **`events`** - Campus event feed
//! - **`mail`** - Internal mail between users
//! - **`users`** - Profiles and personal task lists
//! - **`auth`** - Accounts, JWT tokens, passcode recovery
//! - **`middleware`** - Bearer token authentication
//! - **`extract`** / **`response`** - Validating JSON extractor and common bodies
//! - **`error`** - Backend-specific error types
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains:
//! - The optional SQLite pool
//! - The room registry
//! - The passcode store and mailer
//! - The loaded configuration
//!
//! Handlers extract only the part they need through `FromRef`.
//!
//! # Real-time Fan-out
//!
//! Clients connect over `GET /socket` (WebSocket) and send
//! `joinProject`/`leaveProject` frames, or open `GET /realtime/{projectId}`
//! (Server-Sent Events). After a chat message or file change is stored,
//! the handler broadcasts a `newMessage`, `fileUploaded` or `fileDeleted`
//! frame to every member of that project's room.
//!
//! # Error Handling
//!
//! Handlers return `BackendResult<T>`; `BackendError` renders the JSON error
//! body and picks the status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Validating request extractors
pub mod extract;

/// Common response bodies
pub mod response;

/// Project chat
pub mod messaging;

/// Project file sharing
pub mod files;

/// Campus event feed
pub mod events;

/// Internal mail
pub mod mail;

/// Profiles and personal tasks
pub mod users;

/// Project task boards
pub mod board;

/// Re-export commonly used types
pub use error::BackendError;
pub use realtime::{broadcast_event, RoomRegistry};
pub use server::create_app;
