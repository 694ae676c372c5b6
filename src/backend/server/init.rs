/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Make sure the upload directories exist under the public root
 * 2. Load the optional database and run migrations
 * 3. Create the application state (rooms, passcodes, mailer)
 * 4. Start the maintenance loop
 * 5. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::maintenance;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: server continues and store-backed routes answer 503
/// - Migration failures: logged but don't prevent startup
///
/// Only failing to create the upload directories is fatal.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, std::io::Error> {
    tracing::info!("Initializing TeamHub backend server");

    tokio::fs::create_dir_all(config.files_dir()).await?;
    tracing::info!("[Files] Serving uploads from {}", config.uploads_dir().display());

    let db_pool = load_database(config.database_url.as_deref()).await;
    if db_pool.is_none() {
        tracing::warn!("[Database] No database available, store-backed routes will answer 503");
    }

    let app_state = AppState::new(config, db_pool);

    tokio::spawn(maintenance::run(app_state.clone()));
    tracing::info!(
        "Router configured with maintenance every {:?}",
        app_state.config.purge_interval
    );

    Ok(create_router(app_state))
}
