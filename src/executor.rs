//! Single-flight execution of the queue head against the real game.

use log::{debug, warn};

use crate::board::cozy::Position;
use crate::queue::PremoveQueue;
use crate::submit::GameSnapshot;
use crate::types::Premove;

/// Head submission handed out by [`Executor::try_begin`]; carries the wire
/// notation for the move service.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub premove: Premove,
    pub notation: String,
}

/// Drives queued moves into the real game one at a time. `in_flight` is the
/// execution lock: held from a successful [`Executor::try_begin`] until the
/// matching `finish_*` call, so at most one submission is ever outstanding.
#[derive(Debug, Default)]
pub struct Executor {
    in_flight: bool,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Begin executing the queue head if every precondition holds: the game
    /// is active, the authoritative turn is the user's, the queue is
    /// non-empty, and no submission is in flight.
    ///
    /// The head is re-validated against the authoritative position itself,
    /// not the turn-forced preview base, as a final guard against staleness
    /// between reconciliation and this call. A stale head or an unreadable
    /// position clears the queue and declines without taking the lock.
    pub fn try_begin(
        &mut self,
        game: &GameSnapshot,
        queue: &mut PremoveQueue,
    ) -> Option<PendingSubmission> {
        if self.in_flight || !game.is_active() || game.turn != queue.side() {
            return None;
        }
        let head = *queue.head()?;
        let pos = match Position::from_fen(&game.current_position) {
            Ok(pos) => pos,
            Err(err) => {
                warn!("unreadable authoritative position, dropping premoves: {err}");
                queue.cancel();
                return None;
            }
        };
        if !pos.is_legal(&head) {
            debug!("queue head {head} no longer legal, dropping premoves");
            queue.cancel();
            return None;
        }
        self.in_flight = true;
        Some(PendingSubmission { premove: head, notation: head.notation() })
    }

    /// The submission committed. Remove exactly the head (a no-op if a
    /// cancellation emptied the queue mid-flight) and release the lock.
    pub fn finish_success(&mut self, queue: &mut PremoveQueue) {
        queue.pop_head();
        self.in_flight = false;
    }

    /// The submission failed. One failed move invalidates every remaining
    /// speculative assumption: the whole queue goes, and the lock is
    /// released.
    pub fn finish_failure(&mut self, queue: &mut PremoveQueue) {
        queue.cancel();
        self.in_flight = false;
    }
}
