//! Core move and color types shared by the queue, executor, and session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two player colors, spelled the way the remote service spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// FEN side-to-move token for this color.
    pub fn fen_token(self) -> &'static str {
        match self {
            Side::White => "w",
            Side::Black => "b",
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Algebraic board coordinate ("e4"). Validated at construction; the rest of
/// the crate treats it as an opaque identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square([u8; 2]);

impl Square {
    pub fn parse(s: &str) -> Option<Square> {
        let b = s.as_bytes();
        if b.len() == 2 && (b'a'..=b'h').contains(&b[0]) && (b'1'..=b'8').contains(&b[1]) {
            Some(Square([b[0], b[1]]))
        } else {
            None
        }
    }

    pub fn bytes(self) -> [u8; 2] {
        self.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
    }
}

/// Promotion piece carried by a premove and appended to its wire notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn from_char(c: char) -> Option<Promotion> {
        match c {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }
}

/// A single queued speculative move. Immutable once enqueued; identity is the
/// queue position, so two identical premoves can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Premove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl Premove {
    pub fn new(from: Square, to: Square) -> Premove {
        Premove { from, to, promotion: None }
    }

    pub fn promoting(from: Square, to: Square, promotion: Promotion) -> Premove {
        Premove { from, to, promotion: Some(promotion) }
    }

    /// Parse the four- or five-character wire form ("e2e4", "e7e8q").
    pub fn parse(s: &str) -> Option<Premove> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return None;
        }
        let from = Square::parse(&s[0..2])?;
        let to = Square::parse(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Promotion::from_char(c)?),
            None => None,
        };
        Some(Premove { from, to, promotion })
    }

    /// Wire notation submitted to the move service.
    pub fn notation(&self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.as_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Premove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
