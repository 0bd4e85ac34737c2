//! FIFO queue of speculative moves and its derived preview position.

use log::{debug, info};

use crate::preview::{self, BrokenChain};
use crate::types::{Premove, Side};

/// Ordered premove queue for one game session. Insertion order is execution
/// order. Invariant: every prefix of the queue replays legally from the
/// authoritative position with the turn forced to `side`; any violation
/// discards the whole queue, never a partial repair.
#[derive(Debug)]
pub struct PremoveQueue {
    side: Side,
    moves: Vec<Premove>,
    preview: Option<String>,
}

impl PremoveQueue {
    pub fn new(side: Side) -> Self {
        Self { side, moves: Vec::new(), preview: None }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn moves(&self) -> &[Premove] {
        &self.moves
    }

    pub fn head(&self) -> Option<&Premove> {
        self.moves.first()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Board state after all queued moves; None whenever the queue is empty.
    pub fn preview_fen(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Append `mv` if it is legal in the current preview (or in `base_fen`
    /// when the queue is empty) with the turn forced to the user's side.
    /// Only the new tail is validated here; the chain as a whole is
    /// re-checked on [`PremoveQueue::reconcile`], which is cheaper amortized.
    pub fn add(&mut self, base_fen: &str, mv: Premove) -> bool {
        let current = self.preview.as_deref().unwrap_or(base_fen);
        match preview::apply_speculative(current, self.side, &mv) {
            Some(next) => {
                debug!("queued premove {mv} ({} total)", self.moves.len() + 1);
                self.moves.push(mv);
                self.preview = Some(next);
                true
            }
            None => {
                debug!("rejected premove {mv}");
                false
            }
        }
    }

    /// Unconditionally clear the queue and the preview.
    pub fn cancel(&mut self) {
        self.moves.clear();
        self.preview = None;
    }

    /// Re-validate the whole queue against a new authoritative position.
    /// A fully legal chain keeps the queue and refreshes the preview; any
    /// break discards everything, since a surviving prefix may only make
    /// sense as part of the full sequence the user planned.
    pub fn reconcile(&mut self, base_fen: &str) {
        if self.moves.is_empty() {
            self.preview = None;
            return;
        }
        match preview::replay(base_fen, self.side, &self.moves) {
            Ok(fen) => self.preview = Some(fen),
            Err(BrokenChain { index }) => {
                info!(
                    "premove queue invalidated at index {index}, dropping {} moves",
                    self.moves.len()
                );
                self.cancel();
            }
        }
    }

    /// Remove the executed head. A cancellation may have emptied the queue
    /// while the submission was in flight, in which case this is a no-op.
    pub fn pop_head(&mut self) -> Option<Premove> {
        if self.moves.is_empty() {
            return None;
        }
        let mv = self.moves.remove(0);
        if self.moves.is_empty() {
            self.preview = None;
        }
        Some(mv)
    }
}
