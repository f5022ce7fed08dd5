//! Board geometry: dimensions and the static blocked cells.
//!
//! Blocked cells are kept in a `u64` bitmask where bit `y * width + x`
//! is set for a blocker, so boards are limited to [`MAX_CELLS`] cells.

use crate::error::LevelError;
use crate::geometry::Coord;
use crate::pieces::PieceType;
use crate::state::GameState;

/// Largest supported cell count (one bit per cell).
pub const MAX_CELLS: usize = 64;

/// Default board width used by the generator.
pub const DEFAULT_WIDTH: i32 = 4;

/// Default board height used by the generator.
pub const DEFAULT_HEIGHT: i32 = 4;

/// Immutable board: size plus impassable cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    blocked_mask: u64,
}

impl Board {
    /// Creates a board, rejecting non-positive sizes, oversized boards and
    /// blockers that are out of bounds or listed twice.
    ///
    /// Only small boards are supported: `width * height` may not exceed
    /// [`MAX_CELLS`] because blockers live in a single `u64` mask. A 9x8
    /// board fails with [`LevelError::BoardTooLarge`].
    pub fn new(
        width: i32,
        height: i32,
        blockers: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, LevelError> {
        if width <= 0 || height <= 0 {
            return Err(LevelError::InvalidDimensions { width, height });
        }
        let cells = width as usize * height as usize;
        if cells > MAX_CELLS {
            return Err(LevelError::BoardTooLarge { cells });
        }

        let mut board = Self {
            width,
            height,
            blocked_mask: 0,
        };
        for blocker in blockers {
            let bit = board
                .cell_bit(blocker)
                .ok_or(LevelError::OutOfBounds(blocker))?;
            if board.blocked_mask & bit != 0 {
                return Err(LevelError::DuplicateBlocker(blocker));
            }
            board.blocked_mask |= bit;
        }
        Ok(board)
    }

    /// An empty board with no blockers.
    pub fn open(width: i32, height: i32) -> Result<Self, LevelError> {
        Self::new(width, height, std::iter::empty())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, cell: Coord) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    #[inline]
    pub fn is_blocked(&self, cell: Coord) -> bool {
        self.cell_bit(cell)
            .is_some_and(|bit| self.blocked_mask & bit != 0)
    }

    /// True when a piece may stand on `cell`.
    #[inline]
    pub fn is_open(&self, cell: Coord) -> bool {
        self.cell_bit(cell)
            .is_some_and(|bit| self.blocked_mask & bit == 0)
    }

    #[inline]
    fn cell_bit(&self, cell: Coord) -> Option<u64> {
        self.in_bounds(cell)
            .then(|| 1u64 << (cell.y * self.width + cell.x))
    }

    /// Every cell in x-major order: `(0,0), (0,1), ..., (1,0), ...`.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Coord::new(x, y)))
    }

    /// Blocked cells in x-major order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells().filter(move |&cell| self.is_blocked(cell))
    }

    pub fn blocker_count(&self) -> usize {
        self.blocked_mask.count_ones() as usize
    }

    /// Number of cells a piece can stand on.
    pub fn open_cell_count(&self) -> usize {
        (self.width * self.height) as usize - self.blocker_count()
    }

    /// Checks that every piece is on an open cell and no two pieces share one.
    pub fn validate_state(&self, state: &GameState) -> Result<(), LevelError> {
        let mut occupied = 0u64;
        for &position in state.positions() {
            let bit = self
                .cell_bit(position)
                .ok_or(LevelError::OutOfBounds(position))?;
            if self.blocked_mask & bit != 0 {
                return Err(LevelError::OnBlocker(position));
            }
            if occupied & bit != 0 {
                return Err(LevelError::OverlappingPieces(position));
            }
            occupied |= bit;
        }
        Ok(())
    }
}

/// Formats a board and piece positions as text.
///
/// Rows run from the top (`y = height - 1`) to the bottom. Blockers show
/// as `#`, empty cells as `.`, and pieces by their type glyph (`1` top-left,
/// `2` top-right, `3` bottom-left, `4` bottom-right).
pub fn format_level(board: &Board, state: &GameState) -> String {
    let mut output = String::new();

    for y in (0..board.height()).rev() {
        for x in 0..board.width() {
            let cell = Coord::new(x, y);
            let display_char = if board.is_blocked(cell) {
                '#'
            } else {
                state
                    .piece_at(cell)
                    .map(PieceType::glyph)
                    .unwrap_or('.')
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}
