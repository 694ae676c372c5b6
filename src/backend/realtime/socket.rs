/**
 * Project Socket Channel
 *
 * WebSocket transport for the room registry (`GET /socket`).
 *
 * # Frames
 *
 * Every frame is a JSON text message `{"event": ..., "data": ...}`.
 *
 * - client → server: `joinProject(projectId)`, `leaveProject(projectId)`
 * - server → client: `newMessage`, `fileUploaded`, `fileDeleted`
 *
 * Malformed client frames are logged and ignored; they never close the socket.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};

use crate::backend::realtime::rooms::{ConnectionHandle, RoomRegistry};
use crate::shared::event::ClientFrame;

/// Upgrade handler for `GET /socket`
pub async fn handle_socket_upgrade(
    State(rooms): State<RoomRegistry>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| run_socket(socket, rooms))
}

async fn run_socket(socket: WebSocket, rooms: RoomRegistry) {
    let (handle, mut outbound) = match rooms.connect() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("[Socket] Failed to register connection: {}", e);
            return;
        }
    };
    tracing::info!("[Socket] Connection {} opened", handle.id());

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("[Socket] Failed to serialize frame: {:?}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => apply_client_frame(&handle, text.as_str()),
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            _ = &mut send_task => break,
        }
    }

    send_task.abort();
    tracing::info!("[Socket] Connection {} closed", handle.id());
}

/// Apply one client control frame to the connection's memberships
pub(crate) fn apply_client_frame(handle: &ConnectionHandle, text: &str) {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("[Socket] Ignoring malformed frame from {}: {}", handle.id(), e);
            return;
        }
    };

    let result = match &frame {
        ClientFrame::JoinProject(project_id) | ClientFrame::LeaveProject(project_id)
            if project_id.trim().is_empty() =>
        {
            tracing::warn!("[Socket] Ignoring frame with empty project id from {}", handle.id());
            return;
        }
        ClientFrame::JoinProject(project_id) => handle.join(project_id),
        ClientFrame::LeaveProject(project_id) => handle.leave(project_id),
    };
    if let Err(e) = result {
        tracing::error!("[Socket] Failed to apply {:?}: {}", frame, e);
    }
}
