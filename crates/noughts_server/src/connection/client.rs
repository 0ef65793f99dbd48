//! Per-connection lifecycle: handshake, attach, read loop, detach.

use crate::connection::{next_connection_id, ChannelSink};
use crate::error::ServerError;
use crate::messaging::route_client_frame;
use futures::{SinkExt, StreamExt};
use noughts_session::{GameSession, SessionError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Drives one client connection from handshake to disconnect.
///
/// The connection is attached to the session right after the WebSocket
/// upgrade; a full table is answered with a close frame carrying a
/// "cannot accept" status and the reason, and the socket is dropped.
///
/// For accepted players, outbound snapshots flow through an unbounded FIFO
/// drained by a dedicated writer task, so the session never waits on this
/// socket. The read loop forwards text frames to the session until the
/// client goes away, then frees the slot.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    session: Arc<GameSession>,
) -> Result<(), ServerError> {
    let ws_stream = accept_async(stream)
        .await
        .map_err(|e| ServerError::Network(format!("WebSocket handshake failed for {addr}: {e}")))?;
    let connection_id = next_connection_id();
    let (mut ws_sink, mut ws_receiver) = ws_stream.split();

    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    let slot = match session
        .attach(Arc::new(ChannelSink::new(outbound_tx.clone())))
        .await
    {
        Ok(slot) => slot,
        Err(e @ SessionError::SlotsFull) => {
            info!(%addr, connection_id, "rejecting connection: {e}");
            let frame = CloseFrame {
                code: CloseCode::Unsupported,
                reason: e.to_string().into(),
            };
            let _ = ws_sink.send(Message::Close(Some(frame))).await;
            return Ok(());
        }
    };
    info!(%addr, connection_id, %slot, "player connected");

    // Writer task: drains the outbound queue into the socket. A dead socket
    // only ends this task; the session learns about it through detach below.
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if let Err(e) = ws_sink.send(message).await {
                debug!(connection_id, "stopping writer: {e}");
                break;
            }
        }
    });

    while let Some(message) = ws_receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                route_client_frame(text.as_str(), slot, &session).await;
            }
            Ok(Message::Ping(data)) => {
                let _ = outbound_tx.send(Message::Pong(data));
            }
            Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!(connection_id, "client requested close");
                break;
            }
            Ok(_) => {
                warn!(connection_id, "ignoring non-text frame");
            }
            Err(e) => {
                debug!(connection_id, "read error: {e}");
                break;
            }
        }
    }

    session.detach(slot).await;
    info!(%addr, connection_id, %slot, "player disconnected");

    // Dropping the last sender lets the writer drain and finish.
    drop(outbound_tx);
    let _ = writer.await;

    Ok(())
}
