//! Attack map generation and check detection.
//!
//! An attack map answers "which squares does this color hit right now",
//! ignoring whose turn it is and ignoring whether the attacking piece is
//! pinned. Attacks are not legal moves: a pawn attacks diagonally but
//! pushes straight, so its push squares never appear here.

use crate::{
    board::{
        Board,
        components::{Piece, Side, Square, SquareSet},
    },
    error::EngineError,
    moves::{Direction, KNIGHT_DELTAS},
};

/// Union of the raw (pseudo-legal) attack squares of every piece of `by`.
pub fn attacked_squares(board: &Board, by: Side) -> SquareSet {
    let mut attacked = SquareSet::EMPTY;
    for (square, info) in board.pieces_of(by) {
        attacked |= match info.piece {
            Piece::Pawn => pawn_attacks(square, by),
            Piece::Knight => knight_targets(square),
            Piece::King => king_targets(square),
            Piece::Bishop | Piece::Rook | Piece::Queen => {
                ray_attacks(board, square, Direction::rays_of(info.piece))
            }
        };
    }
    attacked
}

/// `true` if the king of `side` stands on a square the opponent attacks.
pub fn is_in_check(board: &Board, side: Side) -> Result<bool, EngineError> {
    let king = board.king_square(side)?;
    Ok(attacked_squares(board, side.flip()).contains(king))
}

/// The two diagonal-forward squares a pawn attacks. Push squares are not
/// attacks.
pub fn pawn_attacks(square: Square, side: Side) -> SquareSet {
    let dr = side.pawn_dir();
    [(-1, dr), (1, dr)]
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .collect()
}

/// The (up to) eight knight-jump squares from `square`.
pub fn knight_targets(square: Square) -> SquareSet {
    KNIGHT_DELTAS
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .collect()
}

/// The (up to) eight adjacent squares of `square`.
pub fn king_targets(square: Square) -> SquareSet {
    Direction::ALL
        .iter()
        .filter_map(|dir| {
            let (df, dr) = dir.delta();
            square.offset(df, dr)
        })
        .collect()
}

/// Ray-casts from `from` along each direction, stopping at the board edge
/// or the first occupied square. The blocker square itself is attacked
/// whichever color holds it.
pub fn ray_attacks(board: &Board, from: Square, directions: &[Direction]) -> SquareSet {
    let mut attacked = SquareSet::EMPTY;
    for dir in directions {
        let (df, dr) = dir.delta();
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            attacked.insert(next);
            if board.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
    attacked
}
