use clap::Parser;

use arbiter::cli;
use arbiter::prelude::*;

fn main() -> miette::Result<()> {
    init();

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();

    let cli = cli::Cli::parse();
    if cli.verbose {
        set_log_level(Level::DEBUG)?;
    }

    match cli.command {
        Some(cmd) => match cmd {
            cli::Commands::Legal { fen, square } => {
                trace!("Listing legal moves for square {square} in position {fen}");
                let position = Position::from_fen(&fen)?;
                let from = Square::from_str(&square)?;
                let Some(info) = position.board.piece_at(from) else {
                    println!("no piece on {from}");
                    return Ok(());
                };
                let request = MoveRequest::new(from, from, info.piece, info.side);
                let legal =
                    get_legal_moves(&position.board, position.castling_rights, &request)?;
                let destinations: Vec<String> =
                    legal.iter().map(|square| square.to_string()).collect();
                println!(
                    "{} {} on {from}: {}",
                    info.side,
                    info.piece,
                    if destinations.is_empty() {
                        "(no legal moves)".to_string()
                    } else {
                        destinations.join(" ")
                    }
                );
            }
            cli::Commands::Check { fen } => {
                trace!("Checking kings in position {fen}");
                let position = Position::from_fen(&fen)?;
                for side in Side::SIDES {
                    let in_check = is_king_in_check(&position.board, side)?;
                    println!("{side} in check: {in_check}");
                }
            }
            cli::Commands::Classify { fen } => {
                trace!("Classifying position {fen}");
                let position = Position::from_fen(&fen)?;
                let state = classify_game_state(&position, position.stm)?;
                println!("{}", position);
                println!("{} to move: {state}", position.stm);
            }
        },
        None => {
            let position = Position::from_fen(START_FEN)?;
            println!("{}", position);
        }
    }
    Ok(())
}
