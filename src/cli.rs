use clap::{Parser, Subcommand};

use crate::consts::START_FEN;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Raise console logging to debug
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the legal destinations of the piece on a square
    Legal {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        /// Square the piece stands on, e.g. "e2"
        #[arg(short, long)]
        square: String,
    },

    /// Report whether each side's king is in check
    Check {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },

    /// Classify the position for the side to move
    Classify {
        /// FEN string for the position
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },
}
