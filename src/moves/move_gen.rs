//! Legal Move Generation
//!
//! Per-piece generators producing the set of legal destination squares for
//! one piece. Every candidate passes the same self-check filter: apply the
//! move to a board copy, recompute the opponent's attack map, and discard
//! the candidate if the mover's own king ends up attacked. Pins fall out of
//! this uniformly; there is no separate pin detection.

use tracing::{debug, trace};

use crate::{
    board::{
        Board,
        components::{CastlingRights, Piece, Side, Square, SquareSet},
    },
    error::EngineError,
    moves::{Direction, KNIGHT_DELTAS, MoveRequest, attacks},
};

/// Which wing the king castles to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// File the king starts on.
    pub const KING_HOME_FILE: usize = 4;

    pub const fn is_kingside(&self) -> bool {
        matches!(self, CastleSide::KingSide)
    }

    /// File of the rook taking part in this castle.
    pub const fn rook_home_file(&self) -> usize {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// File the castled king lands on.
    pub const fn destination_file(&self) -> usize {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// File the king crosses on the way to its destination.
    pub const fn transit_file(&self) -> usize {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// Files strictly between king and rook, all of which must be empty.
    /// Includes the destination and the square the rook crosses.
    pub const fn span_files(&self) -> &'static [usize] {
        match self {
            CastleSide::KingSide => &[5, 6],
            CastleSide::QueenSide => &[1, 2, 3],
        }
    }
}

/// Every legal destination for the piece named by `request`.
///
/// A request whose `from` square is empty, or holds a different piece or
/// color than stated, yields an empty set: a caller-contract mismatch, not
/// an error. Turn enforcement belongs to the caller.
pub fn get_legal_moves(
    board: &Board,
    rights: CastlingRights,
    request: &MoveRequest,
) -> Result<SquareSet, EngineError> {
    match board.piece_at(request.from) {
        Some(info) if info.piece == request.piece && info.side == request.side => {}
        found => {
            trace!(from = %request.from, ?found, "move request does not match board contents");
            return Ok(SquareSet::EMPTY);
        }
    }

    let legal = match request.piece {
        Piece::Pawn => gen_pawn_moves(board, request.from, request.side)?,
        Piece::Knight => gen_knight_moves(board, request.from, request.side)?,
        Piece::King => gen_king_moves(board, rights, request.from, request.side)?,
        Piece::Bishop | Piece::Rook | Piece::Queen => {
            gen_sliding_moves(board, request.from, request.side, request.piece)?
        }
    };
    debug!(
        piece = %request.piece,
        from = %request.from,
        count = legal.len(),
        "generated legal moves"
    );
    Ok(legal)
}

/// True if the destination named by `request` is among the piece's legal
/// moves.
pub fn is_move_legal(
    board: &Board,
    rights: CastlingRights,
    request: &MoveRequest,
) -> Result<bool, EngineError> {
    Ok(get_legal_moves(board, rights, request)?.contains(request.to))
}

/// The self-check filter: would `side`'s king be safe after `from -> to`?
/// Probes a board copy; the caller's board is never touched.
fn keeps_king_safe(
    board: &Board,
    from: Square,
    to: Square,
    side: Side,
) -> Result<bool, EngineError> {
    let probe = board.with_move_applied(from, to);
    Ok(!attacks::is_in_check(&probe, side)?)
}

/// Sliding pieces walk each ray one step at a time. A friendly blocker ends
/// the ray before it; an enemy blocker is a capture destination and ends
/// the ray after it.
fn gen_sliding_moves(
    board: &Board,
    from: Square,
    side: Side,
    piece: Piece,
) -> Result<SquareSet, EngineError> {
    let mut legal = SquareSet::EMPTY;
    for dir in Direction::rays_of(piece) {
        let (df, dr) = dir.delta();
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            if board.is_friendly(next, side) {
                break;
            }
            let blocked = board.is_occupied(next);
            if keeps_king_safe(board, from, next, side)? {
                legal.insert(next);
            }
            if blocked {
                break;
            }
            current = next;
        }
    }
    Ok(legal)
}

fn gen_knight_moves(board: &Board, from: Square, side: Side) -> Result<SquareSet, EngineError> {
    let mut legal = SquareSet::EMPTY;
    for &(df, dr) in &KNIGHT_DELTAS {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        if board.is_friendly(to, side) {
            continue;
        }
        if keeps_king_safe(board, from, to, side)? {
            legal.insert(to);
        }
    }
    Ok(legal)
}

/// Pawns capture diagonally and push straight. The diagonal squares are
/// destinations only when an enemy piece stands there; the push squares
/// only when empty. The double push needs the start rank and both squares
/// ahead empty.
fn gen_pawn_moves(board: &Board, from: Square, side: Side) -> Result<SquareSet, EngineError> {
    let mut legal = SquareSet::EMPTY;

    for to in attacks::pawn_attacks(from, side) {
        let Some(info) = board.piece_at(to) else {
            continue;
        };
        if info.side == side {
            continue;
        }
        if keeps_king_safe(board, from, to, side)? {
            legal.insert(to);
        }
    }

    let dr = side.pawn_dir();
    let Some(one_ahead) = from.offset(0, dr) else {
        return Ok(legal);
    };
    if board.is_occupied(one_ahead) {
        return Ok(legal);
    }
    if keeps_king_safe(board, from, one_ahead, side)? {
        legal.insert(one_ahead);
    }

    if from.rank() == side.pawn_start_rank()
        && let Some(two_ahead) = one_ahead.offset(0, dr)
        && !board.is_occupied(two_ahead)
        && keeps_king_safe(board, from, two_ahead, side)?
    {
        legal.insert(two_ahead);
    }

    Ok(legal)
}

/// King moves: the eight adjacent squares, plus castling destinations.
///
/// Castling is refused outright while the king is in check, and the
/// self-check filter runs against both the transit square and the
/// destination, so a king can neither castle through nor into an attacked
/// square.
fn gen_king_moves(
    board: &Board,
    rights: CastlingRights,
    from: Square,
    side: Side,
) -> Result<SquareSet, EngineError> {
    let mut legal = SquareSet::EMPTY;
    for dir in &Direction::ALL {
        let (df, dr) = dir.delta();
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        if board.is_friendly(to, side) {
            continue;
        }
        if keeps_king_safe(board, from, to, side)? {
            legal.insert(to);
        }
    }

    if attacks::is_in_check(board, side)? {
        trace!(%from, %side, "king in check, castling refused");
        return Ok(legal);
    }

    for castle_side in CastleSide::BOTH {
        let (eligible, destination) = validate_castling(board, rights, side, castle_side);
        if !eligible {
            continue;
        }
        let Some(to) = destination else {
            continue;
        };
        let transit = Square::from_coords(castle_side.transit_file(), side.back_rank())
            .unwrap_or(to);
        if keeps_king_safe(board, from, transit, side)?
            && keeps_king_safe(board, from, to, side)?
        {
            legal.insert(to);
        }
    }

    Ok(legal)
}

/// Castling eligibility: king on its home square, the rights flag still
/// set, the rook still on its corner, and every square strictly between
/// king and rook empty. Path safety is not decided here; the king generator
/// runs the self-check filter over the transit and destination squares, and
/// refuses castling entirely while the king is in check.
pub fn validate_castling(
    board: &Board,
    rights: CastlingRights,
    side: Side,
    castle_side: CastleSide,
) -> (bool, Option<Square>) {
    let back_rank = side.back_rank();
    let Some(king_home) = Square::from_coords(CastleSide::KING_HOME_FILE, back_rank) else {
        return (false, None);
    };

    let king_in_place = board
        .piece_at(king_home)
        .is_some_and(|info| info.piece == Piece::King && info.side == side);
    if !king_in_place {
        return (false, None);
    }

    if !rights.can_castle(side, castle_side.is_kingside()) {
        return (false, None);
    }

    let Some(rook_home) = Square::from_coords(castle_side.rook_home_file(), back_rank) else {
        return (false, None);
    };
    let rook_in_place = board
        .piece_at(rook_home)
        .is_some_and(|info| info.piece == Piece::Rook && info.side == side);
    if !rook_in_place {
        return (false, None);
    }

    for &file in castle_side.span_files() {
        let Some(between) = Square::from_coords(file, back_rank) else {
            return (false, None);
        };
        if board.is_occupied(between) {
            return (false, None);
        }
    }

    let destination = Square::from_coords(castle_side.destination_file(), back_rank);
    (destination.is_some(), destination)
}
