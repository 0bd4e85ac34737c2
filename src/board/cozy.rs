use cozy_chess::{Board as CozyBoard, Color, Move, Piece};
use thiserror::Error;

use crate::types::{Premove, Promotion, Side, Square};

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid FEN: {0:?}")]
    Fen(cozy_chess::FenParseError),
}

/// Legality oracle over a single position. Answers "what could move from
/// here" and applies moves deterministically; the premove core never touches
/// the board library directly.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        CozyBoard::from_fen(fen, false)
            .map(|b| Self { board: b })
            .map_err(PositionError::Fen)
    }

    pub fn fen(&self) -> String {
        format!("{}", self.board)
    }

    pub fn side_to_move(&self) -> Side {
        match self.board.side_to_move() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn raw_moves(&self) -> Vec<Move> {
        let mut v = Vec::new();
        self.board.generate_moves(|ml| {
            for m in ml {
                v.push(m);
            }
            false
        });
        v
    }

    /// All legal candidates in client form: castling is reported as the king
    /// moving two squares, not the library's king-takes-rook encoding.
    pub fn legal(&self) -> Vec<Premove> {
        let stm = self.board.side_to_move();
        let kings = self.board.pieces(Piece::King) & self.board.colors(stm);
        self.raw_moves()
            .into_iter()
            .filter_map(|m| {
                let mut pm = premove_of(m)?;
                let is_king = kings.into_iter().any(|s| s == m.from);
                if is_king {
                    if let Some(to) = castle_client_form(pm.from, pm.to) {
                        pm.to = to;
                    }
                }
                Some(pm)
            })
            .collect()
    }

    /// Legal candidates from one square (client form, as [`Position::legal`]).
    pub fn moves_from(&self, from: Square) -> Vec<Premove> {
        self.legal().into_iter().filter(|m| m.from == from).collect()
    }

    pub fn is_legal(&self, mv: &Premove) -> bool {
        self.find_move(mv).is_some()
    }

    /// Apply a premove, or None if the oracle rejects it. The original
    /// position is left untouched.
    pub fn apply(&self, mv: &Premove) -> Option<Position> {
        let m = self.find_move(mv)?;
        let mut next = self.board.clone();
        next.play(m);
        Some(Position { board: next })
    }

    /// Locate the legal board move matching a premove. Castling arrives from
    /// the client as the king moving two squares (e1g1); the library encodes
    /// it as king onto the rook square (e1h1), so an exact miss retries the
    /// alias when the source square holds the king.
    fn find_move(&self, mv: &Premove) -> Option<Move> {
        let moves = self.raw_moves();
        let want_promo = mv.promotion.map(piece_of);
        if let Some(m) = moves.iter().copied().find(|m| {
            sq_matches(m.from, mv.from) && sq_matches(m.to, mv.to) && m.promotion == want_promo
        }) {
            return Some(m);
        }
        if mv.promotion.is_none() && self.king_on(mv.from) {
            if let Some(alias) = castle_library_form(mv.from, mv.to) {
                return moves.iter().copied().find(|m| {
                    sq_matches(m.from, mv.from) && sq_matches(m.to, alias) && m.promotion.is_none()
                });
            }
        }
        None
    }

    fn king_on(&self, sq: Square) -> bool {
        let kings = self.board.pieces(Piece::King) & self.board.colors(self.board.side_to_move());
        kings.into_iter().any(|s| sq_matches(s, sq))
    }
}

fn sq_matches(sq: cozy_chess::Square, want: Square) -> bool {
    format!("{sq}").as_bytes() == want.bytes()
}

fn square_of(sq: cozy_chess::Square) -> Option<Square> {
    Square::parse(&format!("{sq}"))
}

fn premove_of(m: Move) -> Option<Premove> {
    let from = square_of(m.from)?;
    let to = square_of(m.to)?;
    Some(match m.promotion.and_then(promotion_of) {
        Some(p) => Premove::promoting(from, to, p),
        None => Premove::new(from, to),
    })
}

fn promotion_of(p: Piece) -> Option<Promotion> {
    match p {
        Piece::Queen => Some(Promotion::Queen),
        Piece::Rook => Some(Promotion::Rook),
        Piece::Bishop => Some(Promotion::Bishop),
        Piece::Knight => Some(Promotion::Knight),
        _ => None,
    }
}

fn piece_of(p: Promotion) -> Piece {
    match p {
        Promotion::Queen => Piece::Queen,
        Promotion::Rook => Piece::Rook,
        Promotion::Bishop => Piece::Bishop,
        Promotion::Knight => Piece::Knight,
    }
}

/// Client castling target -> library king-takes-rook target.
fn castle_library_form(from: Square, to: Square) -> Option<Square> {
    alias(from, to, &[("e1g1", "h1"), ("e1c1", "a1"), ("e8g8", "h8"), ("e8c8", "a8")])
}

/// Library king-takes-rook target -> client castling target.
fn castle_client_form(from: Square, to: Square) -> Option<Square> {
    alias(from, to, &[("e1h1", "g1"), ("e1a1", "c1"), ("e8h8", "g8"), ("e8a8", "c8")])
}

fn alias(from: Square, to: Square, table: &[(&str, &str)]) -> Option<Square> {
    let key = format!("{from}{to}");
    table
        .iter()
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| Square::parse(v))
}
