//! Server error types.

use thiserror::Error;

/// Failures in the transport layer.
///
/// Nothing here is fatal to a running session: a handshake or bind failure
/// concerns one listener or one connection. Game-rule rejections never show
/// up as errors at all - the session drops illegal input silently, and a
/// full table is reported to the rejected client as a close frame.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket binding, handshake or protocol failures.
    #[error("network error: {0}")]
    Network(String),
}
