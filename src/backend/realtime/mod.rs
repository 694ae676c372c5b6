//! Real-time Update Module
//!
//! Project-scoped fan-out: live connections join project rooms, and every
//! committed chat message or file change is pushed to the project's room.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── rooms.rs        - Room registry (membership + delivery)
//! ├── broadcast.rs    - Fan-out dispatcher used by handlers
//! ├── socket.rs       - WebSocket transport (`/socket`)
//! └── subscription.rs - SSE transport (`/realtime/{projectId}`)
//! ```
//!
//! # Flow
//!
//! 1. A client opens `/socket` and sends `joinProject("p1")`
//! 2. Another client posts a chat message to project `p1`
//! 3. The handler stores it, then calls [`broadcast_event`]
//! 4. Every member of room `p1`, the sender included, receives `newMessage`

/// Room registry
pub mod rooms;

/// Event broadcasting utilities
pub mod broadcast;

/// WebSocket transport
pub mod socket;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::broadcast_event;
pub use rooms::{ConnectionHandle, ConnectionId, RoomError, RoomRegistry};
pub use socket::handle_socket_upgrade;
pub use subscription::handle_realtime_subscription;
