//! Game state types: player slots, the board and the broadcast snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic player identity, bound to at most one connection at a time.
///
/// Serialized lowercase (`"x"` / `"o"`) to match the wire format clients
/// expect in the state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    X,
    O,
}

impl Slot {
    /// The opposing slot.
    pub fn other(self) -> Slot {
        match self {
            Slot::X => Slot::O,
            Slot::O => Slot::X,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::X => write!(f, "x"),
            Slot::O => write!(f, "o"),
        }
    }
}

/// The 3x3 playing field, addressed as `(x, y)` with `y` selecting the row.
///
/// Serializes as a nested array of rows, each cell either `null` or a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([[Option<Slot>; 3]; 3]);

impl Board {
    /// Returns the occupant of cell `(x, y)`, if any.
    pub fn cell(&self, x: usize, y: usize) -> Option<Slot> {
        self.0[y][x]
    }

    /// Places `slot` in cell `(x, y)`. The session validates emptiness first.
    pub fn place(&mut self, x: usize, y: usize, slot: Slot) {
        self.0[y][x] = Some(slot);
    }

    /// True once every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|row| row.iter().all(Option::is_some))
    }

    /// Scans for a completed line and returns its owner.
    ///
    /// The scan order is fixed - rows 0..2, then columns 0..2, then the two
    /// diagonals - so that the result is reproducible even for boards that
    /// carry more than one complete line.
    pub fn winner(&self) -> Option<Slot> {
        for y in 0..3 {
            if let Some(slot) = self.0[y][0] {
                if self.0[y][1] == Some(slot) && self.0[y][2] == Some(slot) {
                    return Some(slot);
                }
            }
        }
        for x in 0..3 {
            if let Some(slot) = self.0[0][x] {
                if self.0[1][x] == Some(slot) && self.0[2][x] == Some(slot) {
                    return Some(slot);
                }
            }
        }
        if let Some(slot) = self.0[0][0] {
            if self.0[1][1] == Some(slot) && self.0[2][2] == Some(slot) {
                return Some(slot);
            }
        }
        if let Some(slot) = self.0[0][2] {
            if self.0[1][1] == Some(slot) && self.0[2][0] == Some(slot) {
                return Some(slot);
            }
        }
        None
    }
}

/// The single shared snapshot of a running session.
///
/// Every mutation replaces the snapshot as a whole; connections only ever
/// observe fully-applied states. The JSON shape (camelCase field names,
/// lowercase slots) is the outbound wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Current playing field.
    pub board: Board,
    /// Whose move is currently legal. X moves first after every reset.
    pub player_at_turn: Slot,
    /// Currently occupied slots, at most two, duplicate free.
    pub connected_slots: Vec<Slot>,
    /// Set once a winning line is detected, cleared on reset.
    pub winner: Option<Slot>,
    /// True when every cell is occupied.
    pub board_full: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::default(),
            player_at_turn: Slot::X,
            connected_slots: Vec::new(),
            winner: None,
            board_full: false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_winner() {
        let board = Board::default();
        assert_eq!(board.winner(), None);
        assert!(!board.is_full());
    }

    #[test]
    fn row_line_wins() {
        let mut board = Board::default();
        for x in 0..3 {
            board.place(x, 0, Slot::X);
        }
        assert_eq!(board.winner(), Some(Slot::X));
    }

    #[test]
    fn column_line_wins() {
        let mut board = Board::default();
        for y in 0..3 {
            board.place(2, y, Slot::O);
        }
        assert_eq!(board.winner(), Some(Slot::O));
    }

    #[test]
    fn diagonal_lines_win() {
        let mut board = Board::default();
        for i in 0..3 {
            board.place(i, i, Slot::O);
        }
        assert_eq!(board.winner(), Some(Slot::O));

        let mut board = Board::default();
        board.place(2, 0, Slot::X);
        board.place(1, 1, Slot::X);
        board.place(0, 2, Slot::X);
        assert_eq!(board.winner(), Some(Slot::X));
    }

    #[test]
    fn scan_order_resolves_coexisting_lines_deterministically() {
        // An invalid board carrying two complete lines must still resolve
        // reproducibly: row 0 is scanned before row 2.
        let mut board = Board::default();
        for x in 0..3 {
            board.place(x, 0, Slot::O);
            board.place(x, 2, Slot::X);
        }
        assert_eq!(board.winner(), Some(Slot::O));
    }

    #[test]
    fn snapshot_serializes_with_camel_case_fields() {
        let mut state = GameState::new();
        state.board.place(1, 2, Slot::X);
        state.connected_slots.push(Slot::X);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["playerAtTurn"], "x");
        assert_eq!(json["connectedSlots"], serde_json::json!(["x"]));
        assert_eq!(json["winner"], serde_json::Value::Null);
        assert_eq!(json["boardFull"], false);
        assert_eq!(json["board"][2][1], "x");
        assert_eq!(json["board"][0][0], serde_json::Value::Null);
    }
}
