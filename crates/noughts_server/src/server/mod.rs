//! Server orchestration: listener, accept loop and shutdown coordination.

pub mod core;

pub use core::GameServer;
