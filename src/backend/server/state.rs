/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The optional SQLite pool
 * - The room registry used for real-time fan-out
 * - The passcode store and mailer used for account recovery
 * - The loaded server configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use teamhub::backend::realtime::RoomRegistry;
 *
 * async fn handler(State(rooms): State<RoomRegistry>) -> String {
 *     rooms.room_count().to_string()
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::mailer::Mailer;
use crate::backend::auth::otp::OtpStore;
use crate::backend::error::BackendError;
use crate::backend::realtime::rooms::RoomRegistry;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured. Handlers go through
    /// [`require_pool`] and answer 503 in that case.
    pub db_pool: Option<SqlitePool>,

    /// Project rooms and their live connections
    pub rooms: RoomRegistry,

    /// Outstanding passcodes and reset grants
    pub otp_store: OtpStore,

    /// Passcode delivery
    pub mailer: Mailer,

    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, db_pool: Option<SqlitePool>) -> Self {
        Self {
            db_pool,
            rooms: RoomRegistry::new(),
            otp_store: OtpStore::new(config.otp_ttl),
            mailer: Mailer::from_config(config.smtp.as_ref()),
            config: Arc::new(config),
        }
    }
}

/// Unwrap the optional pool or fail with 503
pub fn require_pool(pool: Option<SqlitePool>) -> Result<SqlitePool, BackendError> {
    pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::Unavailable
    })
}

/// Implement FromRef for Option<SqlitePool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<SqlitePool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for RoomRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}

impl FromRef<AppState> for OtpStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.otp_store.clone()
    }
}

impl FromRef<AppState> for Mailer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
