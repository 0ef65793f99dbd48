//! Decoding of client frames and hand-off to the session.

use crate::messaging::MakeTurn;
use noughts_session::{GameSession, Slot};
use tracing::trace;

/// Decodes a text frame into a move.
///
/// Frames are `"<type>#<json body>"`. Anything that is not a well-formed
/// `make_turn` frame - missing separator, unknown type, malformed body -
/// degrades to [`MakeTurn::SENTINEL`] instead of raising: illegal input is
/// dropped by the session, not answered with an error.
pub fn decode_turn(text: &str) -> MakeTurn {
    match text.split_once('#') {
        Some(("make_turn", body)) => serde_json::from_str(body).unwrap_or(MakeTurn::SENTINEL),
        _ => MakeTurn::SENTINEL,
    }
}

/// Routes one inbound text frame from `slot`'s connection to the session.
pub async fn route_client_frame(text: &str, slot: Slot, session: &GameSession) {
    let turn = decode_turn(text);
    trace!(%slot, x = turn.x, y = turn.y, "routing move to session");
    session.submit_move(slot, turn.x, turn.y).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_well_formed_turn() {
        let turn = decode_turn(r#"make_turn#{"x":2,"y":1}"#);
        assert_eq!(turn, MakeTurn { x: 2, y: 1 });
    }

    #[test]
    fn unknown_message_type_becomes_the_sentinel() {
        assert_eq!(decode_turn(r#"chat#{"x":1,"y":1}"#), MakeTurn::SENTINEL);
    }

    #[test]
    fn frame_without_separator_becomes_the_sentinel() {
        assert_eq!(decode_turn("make_turn"), MakeTurn::SENTINEL);
        assert_eq!(decode_turn(""), MakeTurn::SENTINEL);
    }

    #[test]
    fn malformed_body_becomes_the_sentinel() {
        assert_eq!(decode_turn("make_turn#not json"), MakeTurn::SENTINEL);
        assert_eq!(decode_turn(r#"make_turn#{"x":1}"#), MakeTurn::SENTINEL);
    }

    #[tokio::test]
    async fn routed_garbage_never_mutates_the_session() {
        let session = noughts_session::GameSession::new();
        route_client_frame("garbage", Slot::X, &session).await;
        let state = session.snapshot().await;
        assert_eq!(state, noughts_session::GameState::new());
    }
}
