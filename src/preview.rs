//! Turn normalization and speculative replay of queued moves.

use log::debug;

use crate::board::cozy::Position;
use crate::types::{Premove, Side};

/// Index of the first premove a replay broke at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenChain {
    pub index: usize,
}

/// Rewrite `fen` so the side to move is `side`, for legality checks while it
/// is really the opponent's turn. Flipping the turn leaves a stale
/// en-passant target behind that the board parser would reject, so the
/// target is cleared whenever the turn actually flips.
///
/// Pure token surgery with no failure mode; malformed input is the caller's
/// problem and passes through with only the tokens that are present touched.
pub fn force_turn(fen: &str, side: Side) -> String {
    let mut tokens: Vec<&str> = fen.split_whitespace().collect();
    let want = side.fen_token();
    if tokens.len() >= 2 && tokens[1] != want {
        tokens[1] = want;
        if tokens.len() >= 4 {
            tokens[3] = "-";
        }
    }
    tokens.join(" ")
}

/// Apply one premove on top of `fen` with the turn forced to `side`.
/// None means the oracle rejected the move (or could not read the position).
pub fn apply_speculative(fen: &str, side: Side, mv: &Premove) -> Option<String> {
    let pos = Position::from_fen(&force_turn(fen, side)).ok()?;
    pos.apply(mv).map(|p| p.fen())
}

/// Replay `moves` in order from `base_fen`. Each step re-normalizes the
/// intermediate position first, since the previous step leaves the opponent
/// on move. Stops at the first rejected move: a later premove is only
/// meaningful if everything before it actually happened.
pub fn replay(base_fen: &str, side: Side, moves: &[Premove]) -> Result<String, BrokenChain> {
    let mut fen = base_fen.to_string();
    for (index, mv) in moves.iter().enumerate() {
        match apply_speculative(&fen, side, mv) {
            Some(next) => fen = next,
            None => {
                debug!("premove chain broke at {index}: {mv}");
                return Err(BrokenChain { index });
            }
        }
    }
    Ok(fen)
}
