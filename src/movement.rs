//! Simultaneous-move resolution for a single swipe.
//!
//! This is the one transition function shared by the solver, the
//! generator and live gameplay.
//!
//! Every piece tries to step one cell in the swipe direction. Steps into a
//! wall or a blocker are cancelled up front. Then, while any cell is claimed
//! by more than one piece, every piece that was moving into such a cell is
//! sent back to where it started. All contenders revert; there is no
//! "first piece wins". Reverting a piece can create a new conflict on the
//! cell it went back to, which is why the check repeats.

use crate::geometry::Direction;
use crate::grid::Board;
use crate::pieces::PIECE_COUNT;
use crate::state::GameState;

/// Upper bound on collision passes. With four pieces a chain of reversions
/// settles well before this.
pub const MAX_RESOLUTION_PASSES: usize = 10;

/// Applies one swipe to `state` and returns the resulting state.
///
/// The result depends only on the arguments.
pub fn resolve(state: &GameState, board: &Board, direction: Direction) -> GameState {
    let current = state.positions();

    let mut tentative = *current;
    for (target, &position) in tentative.iter_mut().zip(current) {
        let step = position + direction;
        if board.is_open(step) {
            *target = step;
        }
    }

    for _ in 0..MAX_RESOLUTION_PASSES {
        // claims are counted once per pass, before any piece reverts
        let mut claims = [0u8; PIECE_COUNT];
        for (claim, target) in claims.iter_mut().zip(&tentative) {
            *claim = tentative.iter().filter(|&other| other == target).count() as u8;
        }

        let mut reverted = false;
        for piece in 0..PIECE_COUNT {
            if claims[piece] > 1 && tentative[piece] != current[piece] {
                tentative[piece] = current[piece];
                reverted = true;
            }
        }

        if !reverted {
            break;
        }
    }

    GameState::from_positions(tentative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn state(positions: [(i32, i32); PIECE_COUNT]) -> GameState {
        GameState::from_positions(positions.map(|(x, y)| Coord::new(x, y)))
    }

    #[test]
    fn test_free_pieces_all_move() {
        let board = Board::open(4, 4).unwrap();
        let before = state([(0, 1), (2, 1), (0, 0), (2, 0)]);
        let after = resolve(&before, &board, Direction::Right);
        assert_eq!(after, state([(1, 1), (3, 1), (1, 0), (3, 0)]));
    }

    #[test]
    fn test_walls_stop_only_the_adjacent_piece() {
        let board = Board::open(4, 4).unwrap();
        let before = state([(0, 3), (3, 3), (0, 0), (3, 0)]);
        let after = resolve(&before, &board, Direction::Up);
        assert_eq!(after, state([(0, 3), (3, 3), (0, 1), (3, 1)]));
    }

    #[test]
    fn test_blocker_stops_only_the_adjacent_piece() {
        let board = Board::new(4, 4, [Coord::new(2, 2)]).unwrap();
        let before = state([(1, 2), (0, 3), (0, 0), (2, 0)]);
        let after = resolve(&before, &board, Direction::Right);
        assert_eq!(after, state([(1, 2), (1, 3), (1, 0), (3, 0)]));
    }

    #[test]
    fn test_mover_into_stationary_piece_reverts() {
        // the bottom-right piece is against the wall; the piece behind it
        // cannot take its cell
        let board = Board::open(4, 4).unwrap();
        let before = state([(0, 3), (1, 3), (2, 0), (3, 0)]);
        let after = resolve(&before, &board, Direction::Right);
        assert_eq!(after, state([(1, 3), (2, 3), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_reversions_cascade_down_a_row() {
        let board = Board::open(4, 4).unwrap();
        let before = state([(0, 0), (1, 0), (2, 0), (3, 0)]);
        let after = resolve(&before, &board, Direction::Right);
        assert_eq!(after, before);
    }

    #[test]
    fn test_chain_behind_blocker_cascades() {
        let board = Board::new(4, 1, [Coord::new(0, 0)]).unwrap();
        let before = state([(1, 0), (2, 0), (3, 0), (3, 0)]);
        // duplicate positions never occur in valid states, but resolution
        // must still terminate and keep every piece in place here
        let after = resolve(&before, &board, Direction::Left);
        assert_eq!(after, before);
    }

    #[test]
    fn test_gap_lets_the_trailing_piece_follow() {
        let board = Board::open(4, 4).unwrap();
        let before = state([(0, 0), (1, 0), (3, 2), (3, 3)]);
        let after = resolve(&before, &board, Direction::Right);
        assert_eq!(after, state([(1, 0), (2, 0), (3, 2), (3, 3)]));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let board = Board::new(4, 4, [Coord::new(1, 1), Coord::new(2, 2)]).unwrap();
        let before = state([(0, 1), (2, 1), (1, 2), (3, 3)]);
        for direction in Direction::ALL {
            assert_eq!(
                resolve(&before, &board, direction),
                resolve(&before, &board, direction)
            );
        }
    }
}
