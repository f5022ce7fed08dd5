//! Sliding Corner Puzzle Engine
//!
//! Generates and certifies sliding-piece puzzle levels. Four pieces move
//! together on a small grid with static blockers; a level is won when the
//! pieces form a 2x2 square with each piece in its own corner. The same
//! move resolver drives the breadth-first solver, the level generator and
//! live play.

pub mod catalog;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod level;
pub mod movement;
pub mod persistence;
pub mod pieces;
pub mod seeds;
pub mod session;
pub mod solver;
pub mod state;
pub mod win;

pub use error::{LevelError, PersistenceError};
pub use generator::{Generator, GeneratorConfig, PathBand};
pub use geometry::{Coord, Direction};
pub use grid::Board;
pub use level::LevelData;
pub use pieces::{Piece, PieceType};
pub use solver::{SearchLimits, SearchOutcome};
pub use state::GameState;

/// Puzzle rules bound to one board.
///
/// Gameplay and tooling call these instead of reaching into the individual
/// modules, so the transition function used to certify a level is the one
/// used to play it.
pub trait Rules {
    /// Applies one swipe to `state`.
    fn resolve(&self, state: &GameState, direction: Direction) -> GameState;
    /// Whether `state` is a solved position.
    fn is_win(&self, state: &GameState) -> bool;
    /// Runs the bounded search from `initial`.
    fn solve(&self, initial: &GameState, limits: SearchLimits) -> SearchOutcome;
    /// Shortest solution length with default limits, `None` if unsolvable.
    fn shortest_solution_length(&self, initial: &GameState) -> Option<u32>;
    /// Renders `state` on this board as text.
    fn format_level(&self, state: &GameState) -> String;
}

impl Rules for Board {
    fn resolve(&self, state: &GameState, direction: Direction) -> GameState {
        movement::resolve(state, self, direction)
    }

    fn is_win(&self, state: &GameState) -> bool {
        win::is_win(state)
    }

    fn solve(&self, initial: &GameState, limits: SearchLimits) -> SearchOutcome {
        solver::solve(initial, self, limits)
    }

    fn shortest_solution_length(&self, initial: &GameState) -> Option<u32> {
        solver::shortest_solution_length(initial, self)
    }

    fn format_level(&self, state: &GameState) -> String {
        grid::format_level(self, state)
    }
}
