/**
 * Real-time Route Configuration
 *
 * - `GET /socket` - WebSocket; clients join and leave project rooms
 * - `GET /realtime/{projectId}` - Server-Sent Events for one project room
 * - `GET /health` - liveness probe with the current room counts
 */

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::backend::realtime::{handle_realtime_subscription, handle_socket_upgrade, RoomRegistry};
use crate::backend::server::state::AppState;

async fn health(State(rooms): State<RoomRegistry>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "rooms": rooms.room_count(),
        "connections": rooms.connection_count(),
    }))
}

pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/socket", get(handle_socket_upgrade))
        .route("/realtime/{projectId}", get(handle_realtime_subscription))
        .route("/health", get(health))
}
