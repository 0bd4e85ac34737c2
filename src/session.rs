//! Game session glue: authoritative snapshot intake, premove entry points,
//! and the async pump that drives queued moves into the real game.

use log::{debug, info};

use crate::executor::Executor;
use crate::queue::PremoveQueue;
use crate::submit::{GameSnapshot, MoveReply, MoveSubmitter};
use crate::types::{Premove, Side};

pub type MoveSuccessHandler = Box<dyn FnMut(&MoveReply) + Send>;
pub type MoveErrorHandler = Box<dyn FnMut(&str) + Send>;

/// One active game from the premove subsystem's point of view. Owns the
/// queue, the preview, and the execution lock for the lifetime of the game;
/// all three are discarded when the game id changes.
pub struct GameSession<S> {
    game: Option<GameSnapshot>,
    queue: PremoveQueue,
    executor: Executor,
    submitter: S,
    on_success: MoveSuccessHandler,
    on_error: MoveErrorHandler,
}

impl<S: MoveSubmitter> GameSession<S> {
    pub fn new(
        side: Side,
        submitter: S,
        on_success: MoveSuccessHandler,
        on_error: MoveErrorHandler,
    ) -> Self {
        Self {
            game: None,
            queue: PremoveQueue::new(side),
            executor: Executor::new(),
            submitter,
            on_success,
            on_error,
        }
    }

    pub fn game(&self) -> Option<&GameSnapshot> {
        self.game.as_ref()
    }

    pub fn premoves(&self) -> &[Premove] {
        self.queue.moves()
    }

    pub fn preview_position(&self) -> Option<&str> {
        self.queue.preview_fen()
    }

    /// Position the caller should render: the preview whenever premoves are
    /// queued, the authoritative position otherwise.
    pub fn display_position(&self) -> Option<&str> {
        self.queue
            .preview_fen()
            .or_else(|| self.game.as_ref().map(|g| g.current_position.as_str()))
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn submitter_mut(&mut self) -> &mut S {
        &mut self.submitter
    }

    /// Adopt a new authoritative snapshot. A different game id discards the
    /// queue outright; every update re-validates the chain against the new
    /// position.
    pub fn update_game(&mut self, game: GameSnapshot) {
        if self.game.as_ref().map_or(false, |g| g.game_id != game.game_id) {
            info!("game changed, dropping premoves");
            self.queue.cancel();
        }
        self.queue.reconcile(&game.current_position);
        self.game = Some(game);
    }

    /// Queue a speculative move. Requires an active game; only the new tail
    /// is validated, against the current preview (or the authoritative
    /// position when the queue is empty).
    pub fn add_premove(&mut self, mv: Premove) -> bool {
        let Some(game) = self.game.as_ref() else { return false };
        if !game.is_active() {
            return false;
        }
        self.queue.add(&game.current_position, mv)
    }

    pub fn cancel_premoves(&mut self) {
        self.queue.cancel();
    }

    /// Drive queued moves while it is the user's turn. Submits the head,
    /// merges the authoritative reply into the snapshot, re-validates the
    /// remainder, fires the matching callback, and repeats; a failure clears
    /// the queue and stops. At most one submission is ever in flight, and
    /// the lock is released on both outcomes.
    pub async fn pump(&mut self) {
        loop {
            let Some(game) = self.game.as_ref() else { return };
            let Some(pending) = self.executor.try_begin(game, &mut self.queue) else { return };
            debug!("submitting premove {}", pending.notation);
            let result = self.submitter.submit_move(&game.game_id, &pending.notation).await;
            match result {
                Ok(reply) => {
                    self.executor.finish_success(&mut self.queue);
                    self.merge_reply(&reply);
                    (self.on_success)(&reply);
                }
                Err(err) => {
                    self.executor.finish_failure(&mut self.queue);
                    (self.on_error)(&err.to_string());
                    return;
                }
            }
        }
    }

    /// Fold a successful reply into the held snapshot, the way the
    /// surrounding page merges a move response, then re-validate what is
    /// left of the queue against the new position.
    fn merge_reply(&mut self, reply: &MoveReply) {
        if let Some(game) = self.game.as_mut() {
            game.current_position = reply.current_position.clone();
            game.status = reply.status;
            game.turn = reply.turn;
            game.result = reply.result;
        }
        self.queue.reconcile(&reply.current_position);
    }
}
