//! Outbound delivery: the session-facing side of a connection.

use noughts_session::StateSink;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// A [`StateSink`] backed by the connection's outbound queue.
///
/// The session pushes snapshots here without blocking; the connection's
/// writer task drains the queue into the socket, so per-connection delivery
/// order matches production order. Once the writer is gone the push fails
/// silently - the read loop detaches the slot shortly after, and broadcast
/// failures must never propagate back into the session.
pub struct ChannelSink {
    outbound: mpsc::UnboundedSender<Message>,
}

impl ChannelSink {
    pub fn new(outbound: mpsc::UnboundedSender<Message>) -> Self {
        Self { outbound }
    }
}

impl StateSink for ChannelSink {
    fn send(&self, snapshot: String) {
        let _ = self.outbound.send(Message::text(snapshot));
    }
}
