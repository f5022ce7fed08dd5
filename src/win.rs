//! Goal test: the pieces form a 2x2 square, each in its own corner.

use crate::pieces::PieceType;
use crate::state::GameState;

/// Returns true when the four pieces form an axis-aligned 2x2 square and
/// every piece sits in the corner its type names (top = larger `y`).
pub fn is_win(state: &GameState) -> bool {
    let positions = state.positions();

    let min_x = positions.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = positions.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = positions.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = positions.iter().map(|p| p.y).max().unwrap_or(0);

    if max_x - min_x != 1 || max_y - min_y != 1 {
        return false;
    }

    PieceType::ALL.iter().all(|&piece_type| {
        let (dx, dy) = piece_type.corner_offset();
        let position = state.position(piece_type);
        position.x == min_x + dx && position.y == min_y + dy
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn state(positions: [(i32, i32); 4]) -> GameState {
        GameState::from_positions(positions.map(|(x, y)| Coord::new(x, y)))
    }

    #[test]
    fn test_square_in_correct_corners_wins() {
        assert!(is_win(&state([(1, 3), (2, 3), (1, 2), (2, 2)])));
        assert!(is_win(&state([(0, 1), (1, 1), (0, 0), (1, 0)])));
    }

    #[test]
    fn test_swapped_pieces_do_not_win() {
        // top pair swapped
        assert!(!is_win(&state([(2, 3), (1, 3), (1, 2), (2, 2)])));
        // square flipped upside down
        assert!(!is_win(&state([(1, 2), (2, 2), (1, 3), (2, 3)])));
    }

    #[test]
    fn test_non_square_layouts_do_not_win() {
        // a 2x2 span but two pieces stacked on one cell
        assert!(!is_win(&state([(0, 1), (1, 1), (0, 0), (0, 0)])));
        // a straight line
        assert!(!is_win(&state([(0, 0), (1, 0), (2, 0), (3, 0)])));
        // the starting corners of a 4x4 board
        assert!(!is_win(&state([(0, 3), (3, 3), (0, 0), (3, 0)])));
    }
}
