/**
 * Event Fan-out Dispatcher
 *
 * Turns a committed store write into one frame delivered to every connection
 * in the affected project's room.
 *
 * # Contract
 *
 * - Called only after the store acknowledged the write.
 * - Never fails from the caller's point of view: registry errors are logged
 *   and reported as zero deliveries, so the HTTP response does not depend on
 *   who happens to be listening.
 */

use crate::backend::realtime::rooms::RoomRegistry;
use crate::shared::event::FanoutEvent;

/// Broadcast a fan-out event to the project's room
///
/// # Returns
///
/// Number of connections that received the event (0 if nobody is in the room)
///
/// # Example
///
/// ```rust
/// use teamhub::backend::realtime::{broadcast_event, RoomRegistry};
/// use teamhub::shared::event::FanoutEvent;
///
/// let rooms = RoomRegistry::new();
/// let event = FanoutEvent::file_deleted("p1", uuid::Uuid::new_v4());
/// assert_eq!(broadcast_event(&rooms, event), 0);
/// ```
pub fn broadcast_event(rooms: &RoomRegistry, event: FanoutEvent) -> usize {
    let name = event.kind.wire_name();
    match rooms.broadcast(&event.project_id, name, event.payload) {
        Ok(0) => {
            tracing::debug!("[Realtime] No listeners for {} in project {}", name, event.project_id);
            0
        }
        Ok(delivered) => {
            tracing::info!(
                "[Realtime] {} broadcast to {} connections in project {}",
                name,
                delivered,
                event.project_id
            );
            delivered
        }
        Err(e) => {
            tracing::error!("[Realtime] Failed to broadcast {}: {}", name, e);
            0
        }
    }
}
