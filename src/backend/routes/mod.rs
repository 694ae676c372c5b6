//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Main router creation, layers, static fallback
//! ├── realtime_routes.rs  - Socket, SSE and health
//! └── api_routes.rs       - REST endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use teamhub::backend::routes::create_router;
//! use teamhub::backend::server::{AppState, ServerConfig};
//!
//! let app_state = AppState::new(ServerConfig::from_env(), None);
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

/// Real-time and health routes
pub mod realtime_routes;

/// REST endpoints
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
