//! Inbound message decoding and routing.
//!
//! The inbound wire format is a text frame of
//! the form `"<type>#<json body>"`, where the only recognized type is
//! `make_turn` with a `{"x": <int>, "y": <int>}` body.

pub mod router;
pub mod types;

pub use router::route_client_frame;
pub use types::MakeTurn;
