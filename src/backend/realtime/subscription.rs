/**
 * Real-time Subscription Handler
 *
 * Server-Sent Events transport for the room registry
 * (`GET /realtime/{projectId}`). The subscriber is a receive-only member of
 * one project's room; it sees the same frames as WebSocket members.
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - The room membership lives exactly as long as the response stream
 */

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};

use crate::backend::error::BackendError;
use crate::backend::realtime::rooms::RoomRegistry;

/// Handle real-time subscription (GET /realtime/{projectId})
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: newMessage
/// data: {"id":"...","projectID":"p1","message":"hi",...}
/// ```
pub async fn handle_realtime_subscription(
    State(rooms): State<RoomRegistry>,
    Path(project_id): Path<String>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>>, BackendError> {
    let (handle, rx) = rooms.connect()?;
    handle.join(&project_id)?;
    tracing::info!("[Realtime] SSE subscriber {} joined project {}", handle.id(), project_id);

    // The handle travels with the stream so the membership ends when the client goes away
    let stream = UnboundedReceiverStream::new(rx).map(move |frame| {
        let _member = &handle;
        Event::default().event(frame.event).json_data(&frame.data)
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
