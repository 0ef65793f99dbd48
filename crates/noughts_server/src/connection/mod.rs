//! Connection management for client connections.
//!
//! Handles the lifecycle of one WebSocket client: handshake, slot
//! attachment, the read loop, the outbound writer task, and slot release
//! on disconnect.

pub mod client;
pub mod sink;

pub use client::handle_connection;
pub use sink::ChannelSink;

use std::sync::atomic::{AtomicUsize, Ordering};

/// Type alias for connection identifiers, used for log correlation only.
pub type ConnectionId = usize;

static NEXT_CONNECTION_ID: AtomicUsize = AtomicUsize::new(1);

/// Hands out process-unique connection identifiers.
pub fn next_connection_id() -> ConnectionId {
    NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed)
}
