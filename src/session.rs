//! A level being played: the live state advanced one swipe at a time.
//!
//! Swipes go through the same [`resolve`] the solver uses, so a level the
//! generator certified plays out exactly as searched.

use crate::error::LevelError;
use crate::geometry::Direction;
use crate::grid::Board;
use crate::level::LevelData;
use crate::movement::resolve;
use crate::state::GameState;
use crate::win::is_win;

/// Result of one swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeOutcome {
    /// At least one piece changed cell.
    pub moved: bool,
    /// The state after the swipe is a win.
    pub won: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    initial: GameState,
    state: GameState,
    swipes: u32,
}

impl Game {
    /// Starts a game, rejecting pieces that overlap or sit on blockers.
    pub fn new(board: Board, initial: GameState) -> Result<Self, LevelError> {
        board.validate_state(&initial)?;
        Ok(Self {
            board,
            initial,
            state: initial,
            swipes: 0,
        })
    }

    pub fn from_level(level: &LevelData) -> Result<Self, LevelError> {
        let (board, state) = level.to_board_and_state()?;
        Self::new(board, state)
    }

    /// Applies one swipe. Once the game is won further swipes are ignored.
    pub fn swipe(&mut self, direction: Direction) -> SwipeOutcome {
        if self.is_won() {
            return SwipeOutcome {
                moved: false,
                won: true,
            };
        }

        let next = resolve(&self.state, &self.board, direction);
        let moved = next != self.state;
        if moved {
            self.state = next;
            self.swipes += 1;
        }
        SwipeOutcome {
            moved,
            won: is_win(&self.state),
        }
    }

    /// Puts every piece back at its starting cell.
    pub fn restart(&mut self) {
        self.state = self.initial;
        self.swipes = 0;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Swipes that moved at least one piece since the last restart.
    pub fn swipes(&self) -> u32 {
        self.swipes
    }

    pub fn is_won(&self) -> bool {
        is_win(&self.state)
    }
}
