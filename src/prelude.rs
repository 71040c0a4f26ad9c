pub use crate::board::fen;
pub use crate::board::{
    self, Board, Position,
    components::{CastlingRights, Piece, PieceInfo, Side, Square, SquareSet, SquareSetIter},
};
pub use crate::consts::*;
pub use crate::error::EngineError;
pub use crate::moves::{
    self, Direction, MoveRequest,
    attacks::{attacked_squares, is_in_check, is_in_check as is_king_in_check},
    move_gen::{self, CastleSide, get_legal_moves, is_move_legal, validate_castling},
};
pub use crate::state::{GameState, classify_game_state};
pub use crate::utils::{self, log::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
