pub mod components;
pub mod fen;
#[cfg(test)]
mod tests;

use std::fmt::Display;

use crate::{
    board::components::{CastlingRights, Piece, PieceInfo, Side, Square},
    error::EngineError,
};

/// Piece placement: an arena of square -> piece entries keyed by square
/// index, `None` for empty squares.
///
/// `Board` is a plain value; speculative move application copies it. Nothing
/// in the engine mutates a caller's board in place, which is what makes
/// legality probes safe to run recursively and from parallel callers.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Board {
    squares: [Option<PieceInfo>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<PieceInfo> {
        self.squares[square.index()]
    }

    #[inline(always)]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// True if `square` holds a piece of `side`.
    #[inline(always)]
    pub fn is_friendly(&self, square: Square, side: Side) -> bool {
        self.piece_at(square).is_some_and(|info| info.side == side)
    }

    /// Places a piece on an empty square. Fails if the square is occupied;
    /// the board never holds two pieces on one square.
    pub fn place(&mut self, square: Square, info: PieceInfo) -> Result<(), EngineError> {
        if self.is_occupied(square) {
            return Err(EngineError::malformed(format!(
                "two pieces on square {square}"
            )));
        }
        self.squares[square.index()] = Some(info);
        Ok(())
    }

    /// Locates the king of `side`. Exactly one king per side is a
    /// precondition on every reachable position; its absence is surfaced,
    /// not recovered from.
    pub fn king_square(&self, side: Side) -> Result<Square, EngineError> {
        self.pieces_of(side)
            .find(|(_, info)| info.piece == Piece::King)
            .map(|(square, _)| square)
            .ok_or(EngineError::MissingKing { side })
    }

    /// Returns a new board with the piece at `from` moved to `to`. Whatever
    /// stood on `to` is removed (capture), `from` becomes empty. No legality
    /// validation happens here; this is the probe the self-check filter
    /// evaluates hypothetical moves with.
    #[must_use]
    pub const fn with_move_applied(&self, from: Square, to: Square) -> Board {
        let mut next = *self;
        next.squares[to.index()] = next.squares[from.index()];
        next.squares[from.index()] = None;
        next
    }

    /// All occupied squares with their contents.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, PieceInfo)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                entry.map(|info| (Square::new(index).expect("arena index is in range"), info))
            })
    }

    /// Occupied squares holding pieces of `side`.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, PieceInfo)> + '_ {
        self.occupied_squares()
            .filter(move |(_, info)| info.side == side)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let square = Square::from_coords(file, rank).expect("coords are in range");
                match self.piece_at(square) {
                    Some(info) => write!(f, "{} ", info.piece.fen_char(info.side))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Everything a legality query needs: placement, castling flags, en-passant
/// target and side to move. The unit the game state classifier consumes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub board: Board,
    pub castling_rights: CastlingRights,
    /// Parsed from the input when present; the pawn generator does not yet
    /// consume it. En-passant capture is an extension point.
    pub enpassant_square: Option<Square>,
    pub stm: Side,
}

impl Position {
    pub fn from_fen(input: &str) -> Result<Self, EngineError> {
        fen::parse_position(input)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "stm: {}, castling: {}", self.stm, self.castling_rights)?;
        if let Some(square) = self.enpassant_square {
            write!(f, ", ep: {square}")?;
        }
        Ok(())
    }
}
