//! The game session: slot assignment, move validation and broadcast.

use crate::error::SessionError;
use crate::state::{Board, GameState, Slot};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// How long a finished round stays on screen before the board resets.
pub const RESET_DELAY: Duration = Duration::from_millis(5000);

/// The per-connection "send" capability the transport layer provides.
///
/// Implementations must queue the snapshot and return immediately - the
/// session calls this while holding its state lock, so a blocking send would
/// stall both players. Delivery failures stay inside the sink; the session
/// treats every send as fire-and-forget.
pub trait StateSink: Send + Sync + 'static {
    /// Queue a serialized [`GameState`] snapshot for delivery.
    fn send(&self, snapshot: String);
}

/// Everything guarded by the session's single mutation lock.
struct Inner {
    state: GameState,
    sinks: HashMap<Slot, Arc<dyn StateSink>>,
    pending_reset: Option<JoinHandle<()>>,
}

impl Inner {
    /// Serializes the current state once and queues a copy to every
    /// connected slot. One unreachable recipient never affects the other.
    fn broadcast(&self) {
        let snapshot = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize game state: {e}");
                return;
            }
        };
        for (slot, sink) in &self.sinks {
            trace!(%slot, "queueing state snapshot");
            sink.send(snapshot.clone());
        }
    }
}

/// Sole owner and mutator of the game state for one running session.
///
/// All state transitions - attach, detach, accepted moves and the delayed
/// round reset - are serialized through one internal mutex, and each one
/// ends with a broadcast of the new snapshot to every attached sink.
pub struct GameSession {
    inner: Mutex<Inner>,
    reset_delay: Duration,
    /// Handed to the reset timer task so a torn-down session cannot be
    /// revived by a stale timer.
    self_ref: Weak<GameSession>,
}

impl GameSession {
    /// Creates a session with the standard five second round-reset delay.
    pub fn new() -> Arc<Self> {
        Self::with_reset_delay(RESET_DELAY)
    }

    /// Creates a session with a custom round-reset delay.
    pub fn with_reset_delay(reset_delay: Duration) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            inner: Mutex::new(Inner {
                state: GameState::new(),
                sinks: HashMap::new(),
                pending_reset: None,
            }),
            reset_delay,
            self_ref: weak.clone(),
        })
    }

    /// Attaches a new connection and assigns it a player slot.
    ///
    /// The first occupant always gets X, the second O, regardless of which
    /// of two racing calls wins the lock. With both slots taken the call
    /// fails with [`SessionError::SlotsFull`] and changes nothing.
    ///
    /// On success the current state is broadcast to all connected slots, so
    /// the newly joined and the existing player both see where the round
    /// stands - joining never resets the board.
    pub async fn attach(&self, sink: Arc<dyn StateSink>) -> Result<Slot, SessionError> {
        let mut inner = self.inner.lock().await;
        let slot = if inner.state.connected_slots.contains(&Slot::X) {
            Slot::O
        } else {
            Slot::X
        };
        if inner.state.connected_slots.contains(&slot) {
            return Err(SessionError::SlotsFull);
        }
        inner.sinks.insert(slot, sink);
        inner.state.connected_slots.push(slot);
        debug!(%slot, "player attached");
        inner.broadcast();
        Ok(slot)
    }

    /// Frees `slot` and broadcasts the departure to the remaining player.
    ///
    /// Idempotent: detaching a slot that is not connected is a no-op. The
    /// board, turn and winner are left untouched, so a reconnecting player
    /// resumes the round in progress.
    pub async fn detach(&self, slot: Slot) {
        let mut inner = self.inner.lock().await;
        let was_connected = inner.sinks.remove(&slot).is_some();
        inner.state.connected_slots.retain(|s| *s != slot);
        if was_connected {
            debug!(%slot, "player detached");
            inner.broadcast();
        }
    }

    /// Applies a move claimed by `slot` at `(x, y)`.
    ///
    /// Rejections are silent no-ops with no state change and no broadcast:
    /// out-of-range coordinates (the transport's sentinel for unrecognized
    /// messages lands here), an occupied target cell, a finished round, or
    /// a slot that is not at turn.
    ///
    /// An accepted move places the mark, passes the turn to the other slot,
    /// recomputes fullness and winner, schedules the delayed reset when the
    /// round just ended, and broadcasts the new snapshot.
    pub async fn submit_move(&self, slot: Slot, x: i32, y: i32) {
        let mut inner = self.inner.lock().await;
        if !(0..3).contains(&x) || !(0..3).contains(&y) {
            trace!(%slot, x, y, "move rejected: out of range");
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if inner.state.winner.is_some() || inner.state.board.cell(x, y).is_some() {
            trace!(%slot, x, y, "move rejected: round finished or cell occupied");
            return;
        }
        if inner.state.player_at_turn != slot {
            trace!(%slot, "move rejected: not at turn");
            return;
        }

        inner.state.board.place(x, y, slot);
        inner.state.player_at_turn = slot.other();
        inner.state.board_full = inner.state.board.is_full();
        inner.state.winner = inner.state.board.winner();
        debug!(%slot, x, y, "move accepted");

        if inner.state.winner.is_some() || inner.state.board_full {
            self.schedule_reset(&mut inner);
        }
        inner.broadcast();
    }

    /// Returns a clone of the current snapshot.
    pub async fn snapshot(&self) -> GameState {
        self.inner.lock().await.state.clone()
    }

    /// Cancels an outstanding round reset. Called on server shutdown so a
    /// timer never fires into a session that is being torn down.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(task) = inner.pending_reset.take() {
            task.abort();
        }
    }

    /// Schedules the delayed round restart, superseding any pending one.
    ///
    /// The previous timer is aborted while the state lock is held. A fired
    /// timer has to take the same lock before it can mutate anything, so it
    /// is either still abortable at that point or already finished - a
    /// superseded timer can never also fire.
    fn schedule_reset(&self, inner: &mut Inner) {
        if let Some(task) = inner.pending_reset.take() {
            task.abort();
        }
        let session = self.self_ref.clone();
        let delay = self.reset_delay;
        // Capture the deadline now: `sleep` fixes `Instant::now() + delay` at
        // construction, so the countdown starts when the round ends, not when
        // the spawned task is first polled.
        let sleep = tokio::time::sleep(delay);
        inner.pending_reset = Some(tokio::spawn(async move {
            sleep.await;
            if let Some(session) = session.upgrade() {
                session.start_new_round().await;
            }
        }));
        debug!(delay_ms = delay.as_millis() as u64, "round reset scheduled");
    }

    /// The reset firing: restores the initial round state and broadcasts.
    /// Connected slots are preserved - only the round itself starts over.
    async fn start_new_round(&self) {
        let mut inner = self.inner.lock().await;
        inner.pending_reset = None;
        inner.state.board = Board::default();
        inner.state.player_at_turn = Slot::X;
        inner.state.winner = None;
        inner.state.board_full = false;
        debug!("new round started");
        inner.broadcast();
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(task) = self.inner.get_mut().pending_reset.take() {
            task.abort();
        }
    }
}
