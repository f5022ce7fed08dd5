//! Error types for malformed levels and level files.
//!
//! Search and generation exhaustion are ordinary outcomes and are not
//! represented here.

use thiserror::Error;

use crate::geometry::Coord;
use crate::pieces::PieceType;

/// A caller supplied a board, state or level record that breaks an invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("a game state needs exactly 4 pieces, got {0}")]
    WrongPieceCount(usize),
    #[error("piece type {0:?} appears more than once")]
    DuplicatePieceType(PieceType),
    #[error("piece type {0} is not in 0..=3")]
    UnknownPieceType(u8),
    #[error("board dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("board has {cells} cells, more than the supported {max}", max = crate::grid::MAX_CELLS)]
    BoardTooLarge { cells: usize },
    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("blocker listed twice at {0}")]
    DuplicateBlocker(Coord),
    #[error("piece placed on blocker at {0}")]
    OnBlocker(Coord),
    #[error("two pieces share cell {0}")]
    OverlappingPieces(Coord),
    #[error("solution length band {min}..={max} is empty")]
    InvalidBand { min: u32, max: u32 },
    #[error("blocker range {min}..={max} is empty")]
    InvalidBlockerRange { min: usize, max: usize },
    #[error("unknown swipe direction '{0}' (expected U, D, L or R)")]
    UnknownDirection(char),
}

/// Failure while reading or writing level files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Invalid(#[from] LevelError),
}
