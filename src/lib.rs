pub mod board;
pub mod cli;
pub mod error;
pub mod moves;
pub mod prelude;
pub mod state;
pub mod utils;

pub mod consts {
    pub const NUM_SQUARES: usize = 64;
    pub const NUM_FILES: usize = 8;
    pub const NUM_RANKS: usize = 8;

    pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
}
