use std::str::FromStr;

use crate::{
    board::{
        Board, Position,
        components::{Piece, PieceInfo, Side, Square},
    },
    consts::START_FEN,
    error::EngineError,
};

fn sq(name: &str) -> Square {
    Square::from_str(name).unwrap()
}

#[test]
fn test_empty_board() {
    let board = Board::empty();
    assert_eq!(board.occupied_squares().count(), 0);
    assert_eq!(board.piece_at(sq("e4")), None);
    assert!(!board.is_occupied(sq("e4")));
}

#[test]
fn test_place_rejects_double_occupancy() {
    let mut board = Board::empty();
    board
        .place(sq("e4"), PieceInfo::new(Piece::Knight, Side::White))
        .unwrap();
    let err = board
        .place(sq("e4"), PieceInfo::new(Piece::Pawn, Side::Black))
        .unwrap_err();
    assert!(matches!(err, EngineError::MalformedPositionInput { .. }));
}

#[test]
fn test_king_square() {
    let position = Position::from_fen(START_FEN).unwrap();
    assert_eq!(position.board.king_square(Side::White).unwrap(), sq("e1"));
    assert_eq!(position.board.king_square(Side::Black).unwrap(), sq("e8"));
}

#[test]
fn test_missing_king_is_an_error() {
    let board = Board::empty();
    assert_eq!(
        board.king_square(Side::White).unwrap_err(),
        EngineError::MissingKing { side: Side::White }
    );
}

#[test]
fn test_with_move_applied_moves_and_captures() {
    let position = Position::from_fen("8/8/8/3p4/8/8/3R4/4K2k w - - 0 1").unwrap();
    let board = position.board;

    // Quiet move: source empties, destination fills.
    let after = board.with_move_applied(sq("d2"), sq("d4"));
    assert_eq!(after.piece_at(sq("d2")), None);
    assert_eq!(
        after.piece_at(sq("d4")),
        Some(PieceInfo::new(Piece::Rook, Side::White))
    );

    // Capture: whatever stood on the destination is gone.
    let after = board.with_move_applied(sq("d2"), sq("d5"));
    assert_eq!(
        after.piece_at(sq("d5")),
        Some(PieceInfo::new(Piece::Rook, Side::White))
    );
    assert_eq!(after.occupied_squares().count(), 3);
}

#[test]
fn test_with_move_applied_never_mutates_source() {
    let position = Position::from_fen(START_FEN).unwrap();
    let board = position.board;
    let snapshot = board;

    // Probe many hypothetical moves against the same starting board.
    for (from, info) in board.pieces_of(Side::White) {
        let _ = board.with_move_applied(from, sq("e5"));
        assert_eq!(info, board.piece_at(from).unwrap());
    }
    assert_eq!(board, snapshot);
}

#[test]
fn test_pieces_of_filters_by_side() {
    let position = Position::from_fen(START_FEN).unwrap();
    assert_eq!(position.board.pieces_of(Side::White).count(), 16);
    assert_eq!(position.board.pieces_of(Side::Black).count(), 16);
    assert!(
        position
            .board
            .pieces_of(Side::Black)
            .all(|(square, info)| info.side == Side::Black && square.rank() >= 6)
    );
}

#[test]
fn test_board_display_grid() {
    let position = Position::from_fen(START_FEN).unwrap();
    let printed = position.board.to_string();
    let first_line = printed.lines().next().unwrap();
    assert_eq!(first_line.trim(), "8 r n b q k b n r");
    assert!(printed.ends_with("a b c d e f g h"));
}
