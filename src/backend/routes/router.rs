/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Real-time routes (socket, SSE, health)
 * 2. REST routes (events, files, messages, users, mail, auth, boards)
 * 3. Fallback: static files from the public root, uploads included
 *
 * Layers apply to everything: request tracing, permissive CORS and a body
 * limit sized for the largest upload.
 */

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

/// Room for multipart framing and the text fields around an upload
const BODY_LIMIT_SLACK: u64 = 1024 * 1024;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let public_dir = app_state.config.public_dir.clone();
    let body_limit = usize::try_from(app_state.config.max_file_bytes.saturating_add(BODY_LIMIT_SLACK))
        .unwrap_or(usize::MAX);

    let router = configure_realtime_routes(Router::new());
    let router = configure_api_routes(router, &app_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .fallback_service(ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
