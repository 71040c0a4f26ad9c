use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use arbiter::board::Position;
use arbiter::board::components::{Side, Square};
use arbiter::consts::START_FEN;
use arbiter::moves::{MoveRequest, attacks, move_gen};
use arbiter::state::classify_game_state;

fn setup_position() -> Position {
    Position::from_fen(START_FEN).unwrap()
}

fn bench_attack_map(c: &mut Criterion) {
    let position = setup_position();

    c.bench_function("attacked_squares_startpos", |b| {
        b.iter(|| {
            let attacked = attacks::attacked_squares(black_box(&position.board), Side::White);
            black_box(attacked);
        });
    });
}

fn bench_legal_moves_one_piece(c: &mut Criterion) {
    let position = setup_position();
    let from = Square::new(1).unwrap(); // b1 knight
    let request = MoveRequest::new(
        from,
        from,
        arbiter::board::components::Piece::Knight,
        Side::White,
    );

    c.bench_function("legal_moves_knight_startpos", |b| {
        b.iter(|| {
            let legal = move_gen::get_legal_moves(
                black_box(&position.board),
                position.castling_rights,
                &request,
            )
            .unwrap();
            black_box(legal);
        });
    });
}

fn bench_classify(c: &mut Criterion) {
    let position = setup_position();

    c.bench_function("classify_startpos", |b| {
        b.iter(|| {
            let state = classify_game_state(black_box(&position), Side::White).unwrap();
            black_box(state);
        });
    });
}

criterion_group!(
    benches,
    bench_attack_map,
    bench_legal_moves_one_piece,
    bench_classify
);
criterion_main!(benches);
