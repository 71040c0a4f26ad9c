pub mod attacks;
pub mod move_gen;

use serde::{Deserialize, Serialize};

use crate::board::components::{Piece, Side, Square};

/// Compass direction on the board, expressed as explicit (file, rank)
/// deltas. Stepping through [`Square::offset`] with these can never wrap
/// around a board edge the way raw index offsets do.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ROOK: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const BISHOP: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// (file delta, rank delta) of a single step.
    #[inline(always)]
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// The ray set a sliding piece moves along. Non-sliders get an empty
    /// set; their moves are delta tables, not rays.
    pub const fn rays_of(piece: Piece) -> &'static [Direction] {
        match piece {
            Piece::Rook => &Self::ROOK,
            Piece::Bishop => &Self::BISHOP,
            Piece::Queen => &Self::ALL,
            _ => &[],
        }
    }
}

/// The eight knight jumps as (file, rank) deltas.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// A candidate move as supplied by the caller: which piece, whose piece,
/// from where, to where. An input to legality checks, not a persisted
/// entity. `get_legal_moves` returns every legal destination for the piece;
/// `is_move_legal` tests the named destination against that set.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub side: Side,
}

impl MoveRequest {
    pub const fn new(from: Square, to: Square, piece: Piece, side: Side) -> Self {
        Self {
            from,
            to,
            piece,
            side,
        }
    }
}
