//! Wire contract with the remote move-submission service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Side;

/// Remote game lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Finished,
}

/// Final result reported by the service once a game is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WhiteWin,
    BlackWin,
    Draw,
}

/// Authoritative state returned by the service after a committed move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveReply {
    pub current_position: String,
    pub status: GameStatus,
    pub turn: Side,
    pub result: Option<GameOutcome>,
    pub last_moves: Vec<String>,
}

/// Last confirmed game state, owned by the surrounding session and handed in
/// on every change. The premove core only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: String,
    pub current_position: String,
    pub status: GameStatus,
    pub turn: Side,
    pub result: Option<GameOutcome>,
}

impl GameSnapshot {
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }
}

#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    /// The service rejected the move.
    #[error("{0}")]
    Rejected(String),
    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),
}

/// Commits a move with the remote service. `notation` is the four- or
/// five-character from/to/promotion encoding ("e2e4", "e7e8q").
#[async_trait]
pub trait MoveSubmitter {
    async fn submit_move(&mut self, game_id: &str, notation: &str)
        -> Result<MoveReply, SubmitError>;
}
