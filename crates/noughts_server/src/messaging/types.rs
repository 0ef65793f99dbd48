//! Inbound message payloads.

use serde::Deserialize;

/// The body of a `make_turn` frame: the cell the player wants to mark.
///
/// Coordinates are signed so the sentinel for undecodable input can flow
/// through the same path as real moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MakeTurn {
    pub x: i32,
    pub y: i32,
}

impl MakeTurn {
    /// Guaranteed-rejected move substituted for unrecognized or malformed
    /// messages: the session drops it as out of range.
    pub const SENTINEL: MakeTurn = MakeTurn { x: -1, y: -1 };
}
