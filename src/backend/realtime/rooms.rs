/**
 * Room Registry
 *
 * Tracks which live connections have joined which project rooms and delivers
 * outbound frames to every member of a room.
 *
 * # Model
 *
 * - A connection is registered once with [`RoomRegistry::connect`] and owns
 *   an unbounded outbound queue. The transport (WebSocket or SSE) drains it.
 * - A connection may join any number of rooms. Joining twice is a no-op.
 * - A room exists only while it has members.
 * - Dropping the [`ConnectionHandle`] removes the connection from every room.
 *
 * # Ordering
 *
 * All membership changes and broadcasts go through one mutex, so two
 * broadcasts to the same room reach every member in the same order.
 * The lock is never held across an `.await`.
 */

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::event::ServerFrame;

/// Identifier of one live socket connection
pub type ConnectionId = Uuid;

/// Outbound half of a connection's queue
pub type FrameReceiver = mpsc::UnboundedReceiver<ServerFrame>;

/// Room registry errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// A thread panicked while holding the registry lock
    #[error("Room registry lock poisoned")]
    Poisoned,

    /// The connection was never registered or is already gone
    #[error("Unknown connection {0}")]
    UnknownConnection(ConnectionId),
}

struct Member {
    tx: mpsc::UnboundedSender<ServerFrame>,
    rooms: HashSet<String>,
}

#[derive(Default)]
struct Inner {
    rooms: HashMap<String, HashSet<ConnectionId>>,
    members: HashMap<ConnectionId, Member>,
}

impl Inner {
    fn remove_member(&mut self, connection: ConnectionId) -> bool {
        let Some(member) = self.members.remove(&connection) else {
            return false;
        };
        for project_id in member.rooms {
            self.remove_from_room(&project_id, connection);
        }
        true
    }

    fn remove_from_room(&mut self, project_id: &str, connection: ConnectionId) -> bool {
        let Some(room) = self.rooms.get_mut(project_id) else {
            return false;
        };
        let removed = room.remove(&connection);
        if room.is_empty() {
            self.rooms.remove(project_id);
        }
        removed
    }
}

/// Process-wide map of project rooms to live connections
///
/// Cheap to clone; all clones share the same rooms.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, RoomError> {
        self.inner.lock().map_err(|_| RoomError::Poisoned)
    }

    /// Register a new connection
    ///
    /// Returns the handle that scopes the connection's lifetime and the
    /// receiver the transport forwards to the client.
    pub fn connect(&self) -> Result<(ConnectionHandle, FrameReceiver), RoomError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.lock()?.members.insert(
            id,
            Member {
                tx,
                rooms: HashSet::new(),
            },
        );
        tracing::debug!("[Rooms] Connection {} registered", id);
        let handle = ConnectionHandle {
            id,
            registry: self.clone(),
        };
        Ok((handle, rx))
    }

    /// Add a connection to a project's room
    ///
    /// Returns `true` if membership changed, `false` if it was already a member.
    pub fn join(&self, project_id: &str, connection: ConnectionId) -> Result<bool, RoomError> {
        let mut inner = self.lock()?;
        let member = inner
            .members
            .get_mut(&connection)
            .ok_or(RoomError::UnknownConnection(connection))?;
        if !member.rooms.insert(project_id.to_string()) {
            return Ok(false);
        }
        inner
            .rooms
            .entry(project_id.to_string())
            .or_default()
            .insert(connection);
        tracing::info!("[Rooms] {} joined project {}", connection, project_id);
        Ok(true)
    }

    /// Remove a connection from a project's room
    ///
    /// Leaving a room the connection is not in is a no-op that returns `false`.
    pub fn leave(&self, project_id: &str, connection: ConnectionId) -> Result<bool, RoomError> {
        let mut inner = self.lock()?;
        let was_member = inner
            .members
            .get_mut(&connection)
            .is_some_and(|member| member.rooms.remove(project_id));
        if was_member {
            inner.remove_from_room(project_id, connection);
            tracing::info!("[Rooms] {} left project {}", connection, project_id);
        }
        Ok(was_member)
    }

    /// Deliver one frame to every member of a project's room
    ///
    /// Members whose receiver has been dropped are pruned. Returns the number
    /// of members the frame was queued for.
    pub fn broadcast(
        &self,
        project_id: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<usize, RoomError> {
        let mut inner = self.lock()?;
        let Some(room) = inner.rooms.get(project_id) else {
            return Ok(0);
        };

        let frame = ServerFrame::new(event, payload);
        let mut delivered = 0;
        let mut closed = Vec::new();
        for connection in room {
            match inner.members.get(connection) {
                Some(member) if member.tx.send(frame.clone()).is_ok() => delivered += 1,
                _ => closed.push(*connection),
            }
        }

        for connection in closed {
            tracing::debug!("[Rooms] Pruning closed connection {}", connection);
            if !inner.remove_member(connection) {
                inner.remove_from_room(project_id, connection);
            }
        }
        Ok(delivered)
    }

    /// Remove a connection from every room it joined
    pub fn disconnect(&self, connection: ConnectionId) -> Result<bool, RoomError> {
        let removed = self.lock()?.remove_member(connection);
        if removed {
            tracing::debug!("[Rooms] Connection {} disconnected", connection);
        }
        Ok(removed)
    }

    /// Number of members in a project's room
    pub fn member_count(&self, project_id: &str) -> usize {
        self.lock()
            .map(|inner| inner.rooms.get(project_id).map_or(0, HashSet::len))
            .unwrap_or(0)
    }

    /// Number of non-empty rooms
    pub fn room_count(&self) -> usize {
        self.lock().map(|inner| inner.rooms.len()).unwrap_or(0)
    }

    /// Number of registered connections
    pub fn connection_count(&self) -> usize {
        self.lock().map(|inner| inner.members.len()).unwrap_or(0)
    }
}

/// Owns one registered connection; disconnects it on drop
pub struct ConnectionHandle {
    id: ConnectionId,
    registry: RoomRegistry,
}

impl ConnectionHandle {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn join(&self, project_id: &str) -> Result<bool, RoomError> {
        self.registry.join(project_id, self.id)
    }

    pub fn leave(&self, project_id: &str) -> Result<bool, RoomError> {
        self.registry.leave(project_id, self.id)
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        if let Err(e) = self.registry.disconnect(self.id) {
            tracing::warn!("[Rooms] Failed to disconnect {}: {}", self.id, e);
        }
    }
}
