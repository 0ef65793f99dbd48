//! Error types surfaced by the game session.

use thiserror::Error;

/// Errors a caller of the session API can observe.
///
/// Illegal moves are deliberately absent: out-of-turn, occupied-cell,
/// post-game and out-of-range moves are dropped without any error channel,
/// so the only failure the transport layer ever has to handle is a third
/// connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Both player slots are occupied; the connection must be rejected.
    #[error("both player slots are already occupied")]
    SlotsFull,
}
