//! Game state classification.
//!
//! Drives the move generator exhaustively over one side's pieces to decide
//! whether that side is mated, stalemated, merely in check, or fine. Each
//! candidate costs a board copy and a fresh opponent attack map; acceptable
//! for a turn-based arbiter, not for search throughput.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    board::{Position, components::Side},
    error::EngineError,
    moves::{MoveRequest, attacks, move_gen},
};

/// Verdict on a position for one side.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum GameState {
    /// Side to move has legal moves and is not in check.
    #[default]
    Normal,
    /// Side to move is in check but has legal moves.
    Check,
    /// Side to move is in check with no legal moves.
    Checkmate,
    /// Side to move is not in check and has no legal moves.
    Stalemate,
}

impl GameState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Stalemate)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Normal => write!(f, "normal"),
            GameState::Check => write!(f, "check"),
            GameState::Checkmate => write!(f, "checkmate"),
            GameState::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Classifies the position for `side`: accumulate legal destinations across
/// every piece of that color, then combine the count with check status.
#[instrument(skip(position), fields(stm = %side))]
pub fn classify_game_state(position: &Position, side: Side) -> Result<GameState, EngineError> {
    let board = &position.board;
    let in_check = attacks::is_in_check(board, side)?;

    let mut total_moves = 0u32;
    for (square, info) in board.pieces_of(side) {
        let request = MoveRequest::new(square, square, info.piece, side);
        total_moves += move_gen::get_legal_moves(board, position.castling_rights, &request)?.len();
        if total_moves > 0 && !in_check {
            // A single legal move already settles the non-check verdicts.
            debug!("side has moves and is not in check");
            return Ok(GameState::Normal);
        }
    }

    let state = match (total_moves, in_check) {
        (0, true) => GameState::Checkmate,
        (0, false) => GameState::Stalemate,
        (_, true) => GameState::Check,
        (_, false) => GameState::Normal,
    };
    debug!(%state, total_moves, in_check, "classified position");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn classify_fen(fen: &str) -> GameState {
        let position = Position::from_fen(fen).unwrap();
        classify_game_state(&position, position.stm).unwrap()
    }

    #[test]
    fn test_start_position_is_normal() {
        assert_eq!(classify_fen(crate::consts::START_FEN), GameState::Normal);
    }

    #[test]
    fn test_check_with_moves() {
        // Black rook gives check down the e-file; the king can step aside.
        assert_eq!(
            classify_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1"),
            GameState::Check
        );
    }

    #[test]
    fn test_stalemate_cornered_king() {
        // White king on a1, black king c2 and rook h2 seal every square
        // without attacking a1.
        assert_eq!(
            classify_fen("8/8/8/8/8/8/2k4r/K7 w - - 0 1"),
            GameState::Stalemate
        );
    }

    #[test]
    fn test_checkmate_back_rank() {
        // Same geometry but the rook hits the back rank: king attacked,
        // every flight square covered.
        assert_eq!(
            classify_fen("8/8/8/8/8/1k6/8/K6r w - - 0 1"),
            GameState::Checkmate
        );
    }

    #[test]
    fn test_queen_stalemate() {
        assert_eq!(
            classify_fen("8/8/8/8/8/8/5Q2/7k b - - 0 1"),
            GameState::Stalemate
        );
    }

    #[test]
    fn test_queen_checkmate() {
        assert_eq!(
            classify_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1"),
            GameState::Checkmate
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(GameState::Checkmate.is_terminal());
        assert!(GameState::Stalemate.is_terminal());
        assert!(!GameState::Check.is_terminal());
        assert!(!GameState::Normal.is_terminal());
    }

    #[test]
    fn test_missing_king_is_surfaced() {
        let position = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let err = classify_game_state(&position, Side::Black).unwrap_err();
        assert_eq!(err, EngineError::MissingKing { side: Side::Black });
    }
}
