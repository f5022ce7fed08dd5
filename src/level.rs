//! The persisted level record and its conversion to a board and state.

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::geometry::Coord;
use crate::grid::Board;
use crate::pieces::Piece;
use crate::state::GameState;

/// A generated level as stored on disk.
///
/// Field names follow the level file schema (`levelName`, `gridSize`,
/// `blockerPositions`, `initialPiecePositions`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub seed: i64,
    pub level_name: String,
    /// Board width in `x`, height in `y`.
    pub grid_size: Coord,
    pub blocker_positions: Vec<Coord>,
    pub initial_piece_positions: Vec<Piece>,
}

impl LevelData {
    /// Builds a record from a board and initial state. Pieces are listed in
    /// canonical type order.
    pub fn from_parts(
        seed: i64,
        level_name: impl Into<String>,
        board: &Board,
        state: &GameState,
    ) -> Self {
        Self {
            seed,
            level_name: level_name.into(),
            grid_size: Coord::new(board.width(), board.height()),
            blocker_positions: board.blocked_cells().collect(),
            initial_piece_positions: state.pieces().collect(),
        }
    }

    /// Rebuilds the board, rejecting bad sizes and bad or duplicate blockers.
    pub fn board(&self) -> Result<Board, LevelError> {
        Board::new(
            self.grid_size.x,
            self.grid_size.y,
            self.blocker_positions.iter().copied(),
        )
    }

    /// Rebuilds the initial state, requiring one piece of each type.
    pub fn initial_state(&self) -> Result<GameState, LevelError> {
        GameState::from_pieces(&self.initial_piece_positions)
    }

    /// Rebuilds both and checks that the pieces sit on distinct open cells.
    pub fn to_board_and_state(&self) -> Result<(Board, GameState), LevelError> {
        let board = self.board()?;
        let state = self.initial_state()?;
        board.validate_state(&state)?;
        Ok((board, state))
    }

    /// Checks every invariant of the record.
    pub fn validate(&self) -> Result<(), LevelError> {
        self.to_board_and_state().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceType;

    fn sample() -> LevelData {
        let board = Board::new(4, 4, [Coord::new(2, 1), Coord::new(1, 3), Coord::new(0, 0)]).unwrap();
        let state = GameState::from_pieces(&[
            Piece::new(PieceType::BottomRight, Coord::new(3, 3)),
            Piece::new(PieceType::TopLeft, Coord::new(0, 1)),
            Piece::new(PieceType::TopRight, Coord::new(2, 2)),
            Piece::new(PieceType::BottomLeft, Coord::new(1, 0)),
        ])
        .unwrap();
        LevelData::from_parts(42, "Level_03", &board, &state)
    }

    #[test]
    fn test_from_parts_lists_blockers_x_major_and_pieces_by_type() {
        let level = sample();
        assert_eq!(
            level.blocker_positions,
            vec![Coord::new(0, 0), Coord::new(1, 3), Coord::new(2, 1)]
        );
        let types: Vec<_> = level
            .initial_piece_positions
            .iter()
            .map(|piece| piece.piece_type)
            .collect();
        assert_eq!(types, PieceType::ALL.to_vec());
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_json_schema() {
        let json = serde_json::to_string_pretty(&sample()).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "seed": 42,
          "levelName": "Level_03",
          "gridSize": {
            "x": 4,
            "y": 4
          },
          "blockerPositions": [
            {
              "x": 0,
              "y": 0
            },
            {
              "x": 1,
              "y": 3
            },
            {
              "x": 2,
              "y": 1
            }
          ],
          "initialPiecePositions": [
            {
              "position": {
                "x": 0,
                "y": 1
              },
              "pieceType": 0
            },
            {
              "position": {
                "x": 2,
                "y": 2
              },
              "pieceType": 1
            },
            {
              "position": {
                "x": 1,
                "y": 0
              },
              "pieceType": 2
            },
            {
              "position": {
                "x": 3,
                "y": 3
              },
              "pieceType": 3
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_parsed_record_rebuilds_board_and_state() {
        let json = r#"{
            "seed": 7,
            "levelName": "Level_01",
            "gridSize": {"x": 4, "y": 4},
            "blockerPositions": [{"x": 1, "y": 1}],
            "initialPiecePositions": [
                {"position": {"x": 3, "y": 0}, "pieceType": 3},
                {"position": {"x": 0, "y": 3}, "pieceType": 0},
                {"position": {"x": 3, "y": 3}, "pieceType": 1},
                {"position": {"x": 0, "y": 0}, "pieceType": 2}
            ]
        }"#;
        let level: LevelData = serde_json::from_str(json).unwrap();
        let (board, state) = level.to_board_and_state().unwrap();
        assert!(board.is_blocked(Coord::new(1, 1)));
        assert_eq!(state.position(PieceType::TopLeft), Coord::new(0, 3));
        assert_eq!(state.position(PieceType::BottomRight), Coord::new(3, 0));
    }

    #[test]
    fn test_negative_seed_record_loads() {
        let json = r#"{
            "seed": -1234567,
            "levelName": "Level_03",
            "gridSize": {"x": 4, "y": 4},
            "blockerPositions": [{"x": 2, "y": 2}],
            "initialPiecePositions": [
                {"position": {"x": 0, "y": 3}, "pieceType": 0},
                {"position": {"x": 3, "y": 3}, "pieceType": 1},
                {"position": {"x": 0, "y": 0}, "pieceType": 2},
                {"position": {"x": 3, "y": 0}, "pieceType": 3}
            ]
        }"#;
        let level: LevelData = serde_json::from_str(json).unwrap();
        assert_eq!(level.seed, -1_234_567);
        let (board, state) = level.to_board_and_state().unwrap();
        assert!(board.is_blocked(Coord::new(2, 2)));
        assert_eq!(state.position(PieceType::TopRight), Coord::new(3, 3));
    }

    #[test]
    fn test_invalid_records_are_rejected() {
        let mut on_blocker = sample();
        on_blocker.initial_piece_positions[0].position = Coord::new(2, 1);
        assert_eq!(
            on_blocker.validate(),
            Err(LevelError::OnBlocker(Coord::new(2, 1)))
        );

        let mut missing = sample();
        missing.initial_piece_positions.pop();
        assert_eq!(missing.validate(), Err(LevelError::WrongPieceCount(3)));

        let mut duplicate_blocker = sample();
        duplicate_blocker.blocker_positions.push(Coord::new(0, 0));
        assert_eq!(
            duplicate_blocker.validate(),
            Err(LevelError::DuplicateBlocker(Coord::new(0, 0)))
        );

        let bad_type = r#"{"seed":1,"levelName":"x","gridSize":{"x":4,"y":4},
            "blockerPositions":[],"initialPiecePositions":[{"position":{"x":0,"y":0},"pieceType":9}]}"#;
        assert!(serde_json::from_str::<LevelData>(bad_type).is_err());
    }
}
