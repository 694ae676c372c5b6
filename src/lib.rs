//! TeamHub - Main Library
//!
//! TeamHub is the backend for a student project-collaboration platform:
//! per-project chat and file sharing with real-time fan-out, a kanban task
//! board per project, a campus event feed, internal mail, accounts with
//! OTP-based recovery and personal to-do lists.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared by every surface
//!   - Validation, fan-out events and socket frames, board model
//!   - Error types
//!
//! - **`backend`** - Axum HTTP server
//!   - Room registry and event fan-out dispatcher
//!   - REST handlers backed by SQLite through sqlx
//!   - Authentication, OTP recovery, mail delivery
//!
//! # Usage
//!
//! ```rust,no_run
//! use teamhub::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is cloned into handlers. The room registry sits behind a
//! single mutex so membership changes and broadcasts are totally ordered.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
