//! Search-graph node: the positions of the four pieces.

use std::fmt;

use crate::error::LevelError;
use crate::geometry::Coord;
use crate::pieces::{Piece, PieceType, PIECE_COUNT};

/// Snapshot of all piece positions, indexed by [`PieceType::index`].
///
/// Equality and hashing only look at the position array, so two states
/// reached through different swipe sequences collide in a visited set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    positions: [Coord; PIECE_COUNT],
}

impl GameState {
    /// Builds a state from positions already in canonical type order.
    pub const fn from_positions(positions: [Coord; PIECE_COUNT]) -> Self {
        Self { positions }
    }

    /// Builds a state from pieces in any order.
    ///
    /// Fails unless there is exactly one piece of each type.
    pub fn from_pieces(pieces: &[Piece]) -> Result<Self, LevelError> {
        if pieces.len() != PIECE_COUNT {
            return Err(LevelError::WrongPieceCount(pieces.len()));
        }

        let mut slots: [Option<Coord>; PIECE_COUNT] = [None; PIECE_COUNT];
        for piece in pieces {
            let slot = &mut slots[piece.piece_type.index()];
            if slot.is_some() {
                return Err(LevelError::DuplicatePieceType(piece.piece_type));
            }
            *slot = Some(piece.position);
        }

        // four pieces with no duplicate type fill every slot
        let mut positions = [Coord::default(); PIECE_COUNT];
        for (position, slot) in positions.iter_mut().zip(slots) {
            *position = slot.ok_or(LevelError::WrongPieceCount(pieces.len()))?;
        }
        Ok(Self { positions })
    }

    #[inline]
    pub fn positions(&self) -> &[Coord; PIECE_COUNT] {
        &self.positions
    }

    #[inline]
    pub fn position(&self, piece_type: PieceType) -> Coord {
        self.positions[piece_type.index()]
    }

    /// Pieces in canonical type order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        PieceType::ALL
            .iter()
            .zip(self.positions.iter())
            .map(|(&piece_type, &position)| Piece::new(piece_type, position))
    }

    /// Returns the piece standing on `cell`, if any.
    pub fn piece_at(&self, cell: Coord) -> Option<PieceType> {
        self.positions
            .iter()
            .position(|&position| position == cell)
            .map(|index| PieceType::ALL[index])
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, position) in self.positions.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}
