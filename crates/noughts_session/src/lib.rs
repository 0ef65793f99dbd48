//! # Noughts Session - Two-Player Game Session Core
//!
//! The authoritative state owner for a single two-player noughts-and-crosses
//! round. This crate contains the complete game rules and none of the
//! transport: it hands player slots to incoming connections, validates moves,
//! detects wins, schedules the delayed round restart, and pushes a serialized
//! snapshot of the full game state to every attached connection after each
//! change.
//!
//! ## Architecture
//!
//! * **Single serialization point** - every mutation (attach, detach, move
//!   acceptance, reset firing) is a read-modify-write under one
//!   `tokio::sync::Mutex`, so two racing connections can never both pass
//!   validation against the same stale state.
//! * **Snapshot broadcast** - after each mutation the new state is serialized
//!   once and a copy is queued into every connected slot's [`StateSink`].
//!   Sinks must be non-blocking; a slow or dead connection is the transport
//!   layer's problem and never delays the session or the other player.
//! * **Delayed reset** - a finished round (winner found, or board full with
//!   no winner) schedules a cancellable timer that restores the empty board
//!   after five seconds. Scheduling supersedes any earlier pending timer, and
//!   session shutdown cancels an outstanding one.
//!
//! ## Transport contract
//!
//! The connection layer attaches each new client with [`GameSession::attach`],
//! forwards decoded moves through [`GameSession::submit_move`], and frees the
//! slot with [`GameSession::detach`] on disconnect. Illegal moves are dropped
//! silently by design - malformed or out-of-turn input simply has no effect.

pub use error::SessionError;
pub use session::{GameSession, StateSink, RESET_DELAY};
pub use state::{Board, GameState, Slot};

pub mod error;
pub mod session;
pub mod state;
