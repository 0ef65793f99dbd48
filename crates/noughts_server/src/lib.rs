//! # Noughts Server - WebSocket Transport for the Game Session
//!
//! The connection-facing half of the noughts-and-crosses server. The game
//! rules live entirely in the `noughts_session` crate; this crate terminates
//! WebSocket connections and wires them to the session:
//!
//! * **Connection lifecycle** - accept loop, WebSocket handshake, slot
//!   attachment, and slot release on disconnect
//! * **Inbound decoding** - `"make_turn#{json}"` text frames become moves;
//!   anything unrecognized degrades to a sentinel the session rejects
//! * **Outbound delivery** - each connection owns a FIFO queue drained by a
//!   dedicated writer task, so state snapshots reach a client in production
//!   order and a slow socket never stalls the session
//! * **Process plumbing** - CLI arguments, TOML configuration, tracing
//!   setup, and signal-driven graceful shutdown
//!
//! ## Message flow
//!
//! 1. Client connects; the server attaches it to the session and the client
//!    receives the current state snapshot (a third client is closed with a
//!    "cannot accept" status instead)
//! 2. Client sends a `make_turn` frame; the decoded move is submitted to the
//!    session, which silently drops anything illegal
//! 3. Every accepted mutation broadcasts the new snapshot to both players
//! 4. On disconnect the slot is freed and the remaining player is notified

pub use config::{Args, Config, ServerConfig};
pub use error::ServerError;
pub use server::GameServer;

pub mod config;
pub mod connection;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod server;
pub mod shutdown;
