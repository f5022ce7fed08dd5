//! Logical grid coordinates and swipe directions.
//!
//! Coordinates use the logical convention where increasing `y` is "up".
//! A swipe moves every piece by the same unit offset, so directions are
//! just the four axis-aligned unit vectors.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// A cell position on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Direction> for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, direction: Direction) -> Coord {
        let (dx, dy) = direction.offset();
        Coord::new(self.x + dx, self.y + dy)
    }
}

/// One of the four swipe directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order the solver expands them.
    ///
    /// The order only affects which of several equally short solutions
    /// is reported, never the solution length.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset `(dx, dy)` applied to every piece.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Single-letter notation used by the CLI (`U`, `D`, `L`, `R`).
    pub const fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Result<Self, LevelError> {
        match letter.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'D' => Ok(Direction::Down),
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            other => Err(LevelError::UnknownDirection(other)),
        }
    }
}

/// Parses a swipe sequence such as `"UULR"`. Whitespace and commas are ignored.
pub fn parse_moves(text: &str) -> Result<Vec<Direction>, LevelError> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(Direction::from_letter)
        .collect()
}

/// Formats a swipe sequence in the notation accepted by [`parse_moves`].
pub fn format_moves(moves: &[Direction]) -> String {
    moves.iter().map(|direction| direction.letter()).collect()
}
