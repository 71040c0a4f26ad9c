//! FEN-style position parsing.
//!
//! Only the fields that drive legality are consumed: piece placement, side
//! to move, castling rights and the en-passant target. The halfmove clock
//! and fullmove counter are validated as integers when supplied (the
//! six-field form) but otherwise ignored.

use std::str::FromStr;

use super::{Board, Position, components::*};
use crate::error::EngineError;

/// Parses a position string. Accepts the four legality-relevant fields, or
/// all six standard fields. Anything else is `MalformedPositionInput`.
pub fn parse_position(input: &str) -> Result<Position, EngineError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 4 && parts.len() != 6 {
        return Err(EngineError::malformed(format!(
            "expected 4 or 6 fields, got {}",
            parts.len()
        )));
    }

    let board = parse_placement(parts[0])?;
    let stm = parse_stm(parts[1])?;
    let castling_rights = parse_castle(parts[2])?;
    let enpassant_square = parse_enpassant(parts[3])?;

    if parts.len() == 6 {
        for (name, token) in [("halfmove clock", parts[4]), ("fullmove counter", parts[5])] {
            token.parse::<u16>().map_err(|_| {
                EngineError::malformed(format!("{name} {token:?} is not a number"))
            })?;
        }
    }

    Ok(Position {
        board,
        castling_rights,
        enpassant_square,
        stm,
    })
}

/// Walks the placement field rank by rank. The first rank in the string is
/// rank 8 (indices 56..=63), digits skip that many files, letters place
/// pieces. Overlong ranks, unknown letters and missing ranks all fail.
fn parse_placement(placement: &str) -> Result<Board, EngineError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::malformed(format!(
            "expected 8 ranks in placement, got {}",
            ranks.len()
        )));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
            } else if let Some((piece, side)) = Piece::from_fen_char(c) {
                let square = Square::from_coords(file, rank).ok_or_else(|| {
                    EngineError::malformed(format!("rank {} overflows the board", rank + 1))
                })?;
                board.place(square, PieceInfo::new(piece, side))?;
                file += 1;
            } else {
                return Err(EngineError::malformed(format!(
                    "unrecognized piece letter {c:?}"
                )));
            }
        }
        if file != 8 {
            return Err(EngineError::malformed(format!(
                "rank {} covers {file} files, expected 8",
                rank + 1
            )));
        }
    }
    Ok(board)
}

fn parse_stm(stm: &str) -> Result<Side, EngineError> {
    match stm {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => Err(EngineError::malformed(format!(
            "side to move must be 'w' or 'b', got {stm:?}"
        ))),
    }
}

fn parse_castle(castle: &str) -> Result<CastlingRights, EngineError> {
    let mut res = 0u8;
    for c in castle.chars() {
        match c {
            'K' => res |= CastlingRights::WHITE_00,
            'Q' => res |= CastlingRights::WHITE_000,
            'k' => res |= CastlingRights::BLACK_00,
            'q' => res |= CastlingRights::BLACK_000,
            '-' => res = CastlingRights::NO_CASTLING,
            _ => {
                return Err(EngineError::malformed(format!(
                    "unexpected character {c:?} in castling field"
                )));
            }
        };
    }
    Ok(CastlingRights(res))
}

fn parse_enpassant(enpassant: &str) -> Result<Option<Square>, EngineError> {
    if enpassant == "-" {
        return Ok(None);
    }
    let square = Square::from_str(enpassant)?;
    // The target sits behind a double-pushed pawn, so only two ranks work.
    if square.rank() != 2 && square.rank() != 5 {
        return Err(EngineError::malformed(format!(
            "en-passant target {square} is not on rank 3 or 6"
        )));
    }
    Ok(Some(square))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_FEN;

    #[test]
    fn test_parse_start_position() {
        let position = parse_position(START_FEN).unwrap();
        assert_eq!(position.stm, Side::White);
        assert_eq!(position.castling_rights, CastlingRights::all());
        assert_eq!(position.enpassant_square, None);

        let e1 = "e1".parse::<Square>().unwrap();
        let d8 = "d8".parse::<Square>().unwrap();
        assert_eq!(
            position.board.piece_at(e1),
            Some(PieceInfo::new(Piece::King, Side::White))
        );
        assert_eq!(
            position.board.piece_at(d8),
            Some(PieceInfo::new(Piece::Queen, Side::Black))
        );
        assert_eq!(position.board.occupied_squares().count(), 32);
    }

    #[test]
    fn test_parse_four_field_form() {
        let position = parse_position("8/8/8/8/8/8/8/4K2k w - -").unwrap();
        assert_eq!(position.board.occupied_squares().count(), 2);
        assert!(position.castling_rights.is_empty());
    }

    #[test]
    fn test_wrong_field_count_is_rejected() {
        assert!(parse_position("8/8/8/8/8/8/8/4K2k w -").is_err());
        assert!(parse_position("8/8/8/8/8/8/8/4K2k").is_err());
        assert!(parse_position("").is_err());
    }

    #[test]
    fn test_bad_placement_is_rejected() {
        // unknown letter
        assert!(parse_position("8/8/8/8/8/8/8/4X2k w - - 0 1").is_err());
        // seven ranks
        assert!(parse_position("8/8/8/8/8/8/4K2k w - - 0 1").is_err());
        // rank too long
        assert!(parse_position("9/8/8/8/8/8/8/4K2k w - - 0 1").is_err());
        // rank too short
        assert!(parse_position("7/8/8/8/8/8/8/4K2k w - - 0 1").is_err());
    }

    #[test]
    fn test_parse_enpassant() {
        let square = parse_enpassant("e3").unwrap().unwrap();
        assert_eq!(square, "e3".parse::<Square>().unwrap());
        assert_eq!(parse_enpassant("-").unwrap(), None);
        assert!(parse_enpassant("e4").is_err());
        assert!(parse_enpassant("e").is_err());
        assert!(parse_enpassant("").is_err());
    }

    #[test]
    fn test_parse_castle() {
        assert_eq!(parse_castle("KQkq").unwrap(), CastlingRights::all());
        assert_eq!(parse_castle("-").unwrap(), CastlingRights::empty());
        assert_eq!(parse_castle("KQ").unwrap(), CastlingRights::WHITE_CASTLING);
        assert!(parse_castle("KX").is_err());
    }

    #[test]
    fn test_counters_must_be_numeric() {
        assert!(parse_position("8/8/8/8/8/8/8/4K2k w - - x 1").is_err());
        assert!(parse_position("8/8/8/8/8/8/8/4K2k w - - 0 y").is_err());
    }
}
