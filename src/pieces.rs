//! The four movable pieces.
//!
//! Every level has exactly one piece of each type. The goal is to bring
//! them together into a 2x2 square with each piece in the corner its
//! type names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::geometry::Coord;

/// Number of movable pieces in every level.
pub const PIECE_COUNT: usize = 4;

/// Piece type tag. The discriminant is the canonical index of the piece
/// inside a [`GameState`](crate::state::GameState) and its integer form in
/// level files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PieceType {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl PieceType {
    /// All types in canonical (ascending) order.
    pub const ALL: [PieceType; PIECE_COUNT] = [
        PieceType::TopLeft,
        PieceType::TopRight,
        PieceType::BottomLeft,
        PieceType::BottomRight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset from the bottom-left cell of the winning square.
    pub const fn corner_offset(self) -> (i32, i32) {
        match self {
            PieceType::TopLeft => (0, 1),
            PieceType::TopRight => (1, 1),
            PieceType::BottomLeft => (0, 0),
            PieceType::BottomRight => (1, 0),
        }
    }

    /// Glyph used by the text renderer.
    pub const fn glyph(self) -> char {
        match self {
            PieceType::TopLeft => '1',
            PieceType::TopRight => '2',
            PieceType::BottomLeft => '3',
            PieceType::BottomRight => '4',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<PieceType> for u8 {
    fn from(piece_type: PieceType) -> u8 {
        piece_type as u8
    }
}

impl TryFrom<u8> for PieceType {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PieceType::ALL
            .get(value as usize)
            .copied()
            .ok_or(LevelError::UnknownPieceType(value))
    }
}

/// A piece at a position. This is also the per-piece entry of a level file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub position: Coord,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(piece_type: PieceType, position: Coord) -> Self {
        Self {
            position,
            piece_type,
        }
    }
}
