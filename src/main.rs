use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::thread_rng;

mod cli;
mod engine;
mod error;

use engine::board::Board;
use engine::game::Game;

#[derive(Parser)]
#[command(about = "play 2048 in your terminal")]
struct Args {
    /// File receiving the game log.
    #[arg(long, default_value = "./output.log")]
    log_file: PathBuf,

    /// Start from a randomly generated board instead of a single spawned tile.
    #[arg(long)]
    random_board: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(args.verbose.log_level_filter())
        .chain(fern::log_file(&args.log_file)?)
        .apply()?;

    let mut game = if args.random_board {
        let mut rng = thread_rng();
        let board = Board::random(&mut rng)?;
        Game::new(board, rng)
    } else {
        Game::standard(thread_rng())?
    };
    log::info!("new game started");

    cli::run(&mut game)?;

    Ok(())
}
