use std::{
    fmt::{Display, Write},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

/// A set of squares, one bit per square index.
///
/// Attack maps and legal-move results are `SquareSet`s.
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Clone, Copy, Serialize)]
#[repr(transparent)]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: Self = Self(0);

    #[inline(always)]
    pub const fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.index();
    }

    #[inline(always)]
    pub const fn remove(&mut self, square: Square) {
        self.0 &= !(1 << square.index());
    }

    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & (1 << square.index())) != 0
    }

    #[inline(always)]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    pub const fn iter(&self) -> SquareSetIter {
        SquareSetIter { remaining: self.0 }
    }

    pub fn print_grid(&self) -> String {
        let mut out = String::with_capacity(8 * 8 * 2);
        for rank in (0..8).rev() {
            for file in 0..8 {
                let mask = 1u64 << (rank * 8 + file);
                let char = if self.0 & mask != 0 { '1' } else { '0' };
                write!(out, "{char} ").expect("");
            }
            out = out.trim().to_owned();
            writeln!(out).unwrap();
        }
        out
    }
}

impl BitAndAssign for SquareSet {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl BitOrAssign for SquareSet {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitOr for SquareSet {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for SquareSet {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for SquareSet {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator that yields each square present in a SquareSet
pub struct SquareSetIter {
    remaining: u64,
}

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1;
        Square::new(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.remaining.count_ones() as usize;
        (exact, Some(exact))
    }
}

impl ExactSizeIterator for SquareSetIter {
    fn len(&self) -> usize {
        self.remaining.count_ones() as usize
    }
}

#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy, Serialize, Deserialize)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        self.flip()
    }
}

impl Side {
    pub const SIDES: [Side; 2] = [Side::White, Side::Black];

    pub const fn flip(&self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    /// Forward direction of this side's pawns as a rank delta.
    pub const fn pawn_dir(&self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Rank a pawn of this side double-pushes from.
    pub const fn pawn_start_rank(&self) -> usize {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Rank this side's king and rooks start on.
    pub const fn back_rank(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

#[derive(Default, PartialEq, Eq, Debug, PartialOrd, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Piece::Pawn => write!(f, "Pawn"),
            Piece::Knight => write!(f, "Knight"),
            Piece::Bishop => write!(f, "Bishop"),
            Piece::Rook => write!(f, "Rook"),
            Piece::Queen => write!(f, "Queen"),
            Piece::King => write!(f, "King"),
        }
    }
}

impl Piece {
    pub const PIECES: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub const PIECE_CHARS: [[char; 6]; 2] = [
        ['P', 'N', 'B', 'R', 'Q', 'K'], // White
        ['p', 'n', 'b', 'r', 'q', 'k'], // Black
    ];

    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    #[inline(always)]
    pub const fn is_sliding(&self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Maps a FEN letter to (piece, side). Uppercase is White.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, side))
    }

    pub const fn fen_char(&self, side: Side) -> char {
        Self::PIECE_CHARS[side.index()][self.index()]
    }
}

/// Compact struct to hold piece and side
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Clone, Copy, Serialize, Deserialize)]
pub struct PieceInfo {
    pub piece: Piece,
    pub side: Side,
}

impl PieceInfo {
    pub const fn new(piece: Piece, side: Side) -> Self {
        Self { piece, side }
    }
}

/// Castling rights are stored in a [`u8`], one bit per (side, wing):
/// ```text
/// Bit: 3 2 1 0
///      q k Q K
///      | | | |
///      | | | +-- White kingside right
///      | | +---- White queenside right
///      | +------ Black kingside right
///      +-------- Black queenside right
/// ```
/// The engine only consumes these flags; clearing them when a king or rook
/// moves is the move-application layer's job.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Clone, Copy)]
#[repr(transparent)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NO_CASTLING: u8 = 0;
    /// White King side castling
    pub const WHITE_00: u8 = 0b0001;
    /// White Queen side castling
    pub const WHITE_000: u8 = 0b0010;
    /// Black King side castling
    pub const BLACK_00: u8 = 0b0100;
    /// Black Queen side castling
    pub const BLACK_000: u8 = 0b1000;

    pub const WHITE_CASTLING: Self = Self(Self::WHITE_00 | Self::WHITE_000);
    pub const BLACK_CASTLING: Self = Self(Self::BLACK_00 | Self::BLACK_000);
    pub const ANY_CASTLING: Self = Self(Self::WHITE_CASTLING.0 | Self::BLACK_CASTLING.0);

    #[inline(always)]
    pub const fn all() -> Self {
        Self::ANY_CASTLING
    }

    #[inline(always)]
    pub const fn empty() -> Self {
        Self(Self::NO_CASTLING)
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn allows(&self, rights: CastlingRights) -> bool {
        self.0 & rights.0 != Self::NO_CASTLING
    }

    #[inline(always)]
    pub const fn add_right(&mut self, rights: CastlingRights) {
        self.0 |= rights.0;
    }

    #[inline(always)]
    pub const fn remove_right(&mut self, rights: CastlingRights) {
        self.0 &= !rights.0;
    }

    #[inline(always)]
    pub const fn can_castle(&self, side: Side, kingside: bool) -> bool {
        match (side, kingside) {
            (Side::White, true) => self.allows(CastlingRights(CastlingRights::WHITE_00)),
            (Side::White, false) => self.allows(CastlingRights(CastlingRights::WHITE_000)),
            (Side::Black, true) => self.allows(CastlingRights(CastlingRights::BLACK_00)),
            (Side::Black, false) => self.allows(CastlingRights(CastlingRights::BLACK_000)),
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::empty()
    }
}

impl BitOr for CastlingRights {
    type Output = CastlingRights;

    fn bitor(self, rhs: CastlingRights) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.allows(Self(Self::WHITE_00)) {
            write!(f, "K")?;
        }
        if self.allows(Self(Self::WHITE_000)) {
            write!(f, "Q")?;
        }
        if self.allows(Self(Self::BLACK_00)) {
            write!(f, "k")?;
        }
        if self.allows(Self(Self::BLACK_000)) {
            write!(f, "q")?;
        }
        if self.is_empty() {
            write!(f, "-")?;
        }
        Ok(())
    }
}

/// Represents a single square on the board.
/// # Representation
/// Rank-major, file 0 = a-file, rank 0 = White's back rank:
/// ```text
/// ranks
///  ^ A8, B8, C8, D8, E8, F8, G8, H8   <- h8 (index 63)
///  | A7, B7, C7, D7, E7, F7, G7, H7
///  | A6, B6, C6, D6, E6, F6, G6, H6
///  | A5, B5, C5, D5, E5, F5, G5, H5
///  | A4, B4, C4, D4, E4, F4, G4, H4
///  | A3, B3, C3, D3, E3, F3, G3, H3
///  | A2, B2, C2, D2, E2, F2, G2, H2
///  | A1, B1, C1, D1, E1, F1, G1, H1   <- a1 (index 0)
///    ------- files ------->
/// ```
#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize)]
#[repr(transparent)]
pub struct Square(usize);

impl Square {
    /// Returns a Square from a given index. Will return None if index is out of bounds.
    /// index should be [0, 63]
    #[inline(always)]
    pub const fn new(index: usize) -> Option<Self> {
        if index < 64 {
            return Some(Self(index));
        }
        None
    }

    /// Returns a Square from a given File and Rank.
    /// Will return None if either File or Rank are out of bounds.
    #[inline(always)]
    pub const fn from_coords(file: usize, rank: usize) -> Option<Self> {
        if file < 8 && rank < 8 {
            return Some(Square(rank * 8 + file));
        }
        None
    }

    /// The square reached by stepping `df` files and `dr` ranks, or None if
    /// the step leaves the board. This is the single geometry primitive all
    /// generators go through; a raw-index offset can wrap around the board
    /// edge, a file/rank step cannot.
    #[inline(always)]
    pub const fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Square((rank * 8 + file) as usize))
    }

    /// File in [0, 7]; 0 is the a-file.
    #[inline(always)]
    pub const fn file(&self) -> usize {
        self.0 % 8
    }

    /// Rank in [0, 7]; 0 is White's back rank.
    #[inline(always)]
    pub const fn rank(&self) -> usize {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub const fn same_rank(&self, other: Square) -> bool {
        self.rank() == other.rank()
    }

    #[inline(always)]
    pub const fn same_file(&self, other: Square) -> bool {
        self.file() == other.file()
    }

    /// True if both squares lie on a common diagonal.
    #[inline(always)]
    pub const fn same_diagonal(&self, other: Square) -> bool {
        let df = self.file() as i8 - other.file() as i8;
        let dr = self.rank() as i8 - other.rank() as i8;
        df.abs() == dr.abs()
    }

    /// True if the square touches the rim of the board.
    #[inline(always)]
    pub const fn is_edge(&self) -> bool {
        self.file() == 0 || self.file() == 7 || self.rank() == 0 || self.rank() == 7
    }

    /// Chebyshev distance: the number of king steps between two squares.
    #[inline(always)]
    pub const fn distance(&self, other: Square) -> usize {
        let df = (self.file() as i8 - other.file() as i8).unsigned_abs() as usize;
        let dr = (self.rank() as i8 - other.rank() as i8).unsigned_abs() as usize;
        if df > dr { df } else { dr }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.0
    }
}

impl TryFrom<usize> for Square {
    type Error = EngineError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Square::new(value).ok_or(EngineError::InvalidSquare { index: value })
    }
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_uppercase();
        let mut iter = s.chars();
        let (Some(letter), Some(num), None) = (iter.next(), iter.next(), iter.next()) else {
            return Err(EngineError::malformed(format!(
                "square needs one letter and one digit, got {s:?}"
            )));
        };
        if !letter.is_ascii_uppercase() || !num.is_ascii_digit() {
            return Err(EngineError::malformed(format!("bad square {s:?}")));
        }
        let file = (letter as u8 - b'A') as usize;
        let rank = (num as u8 - b'1') as usize;
        Square::from_coords(file, rank)
            .ok_or_else(|| EngineError::malformed(format!("square {s:?} is off the board")))
    }
}

impl TryFrom<String> for Square {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::from_str(&value)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let index = usize::deserialize(deserializer)?;
        Square::new(index)
            .ok_or_else(|| serde::de::Error::custom(format!("square index {index} out of range")))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (self.0 % 8) as u8 + b'A';
        let rank = 1 + (self.0 / 8) as u8 + b'0';
        write!(f, "{}{}", file as char, rank as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_square() {
        assert_eq!(format!("{}", Square(0)), "A1");
        assert_eq!(format!("{}", Square(7)), "H1");
        assert_eq!(format!("{}", Square(8)), "A2");
        assert_eq!(format!("{}", Square(11)), "D2");
        assert_eq!(format!("{}", Square(28)), "E4");
        assert_eq!(format!("{}", Square(56)), "A8");
        assert_eq!(format!("{}", Square(63)), "H8");
    }

    #[test]
    fn test_square_from_str() {
        assert_eq!("e4".parse::<Square>().unwrap(), Square(28));
        assert_eq!("A1".parse::<Square>().unwrap(), Square(0));
        assert_eq!("h8".parse::<Square>().unwrap(), Square(63));
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a11".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset_never_wraps() {
        let h4 = "h4".parse::<Square>().unwrap();
        assert_eq!(h4.offset(1, 0), None);
        assert_eq!(h4.offset(1, 1), None);
        assert_eq!(h4.offset(-1, 0), Some(Square(30)));

        let a1 = Square(0);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 1), Some(Square(9)));
    }

    #[test]
    fn test_geometry_predicates() {
        let a1 = Square(0);
        let h8 = Square(63);
        let e4 = Square(28);
        assert!(a1.same_diagonal(h8));
        assert!(!a1.same_diagonal(e4));
        assert!(a1.same_rank(Square(7)));
        assert!(a1.same_file(Square(56)));
        assert!(!e4.same_rank(a1));
        assert!(a1.is_edge());
        assert!(h8.is_edge());
        assert!(!e4.is_edge());
        assert_eq!(a1.distance(h8), 7);
        assert_eq!(e4.distance(Square(29)), 1);
    }

    #[test]
    fn test_try_from_index_bounds() {
        assert_eq!(Square::try_from(63usize).unwrap(), Square(63));
        assert_eq!(
            Square::try_from(64usize).unwrap_err(),
            EngineError::InvalidSquare { index: 64 }
        );
    }

    #[test]
    fn test_print_grid() {
        let out = "0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 1 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
";
        let mut set = SquareSet::EMPTY;
        set.insert(Square(36)); // e5
        assert_eq!(out, set.print_grid());
    }

    #[test]
    fn test_squareset_ops() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Square(4));
        set.insert(Square(60));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Square(4)));
        assert!(!set.contains(Square(5)));
        set.remove(Square(4));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Square(60)]);
    }

    #[test]
    fn test_castling_rights_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::empty().to_string(), "-");
        assert_eq!(CastlingRights::WHITE_CASTLING.to_string(), "KQ");
    }

    #[test]
    fn test_square_serde_rejects_out_of_range() {
        let square: Square = serde_json::from_str("28").unwrap();
        assert_eq!(square, Square(28));
        assert!(serde_json::from_str::<Square>("64").is_err());
    }
}
