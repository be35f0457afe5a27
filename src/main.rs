mod cli;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use minesweeper::{game_loop, prompt_difficulty, Difficulty, GameController, TerminalScreen};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the board, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    println!("Welcome to Console Minesweeper!");
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let difficulty = match cli.difficulty {
        Some(name) => Difficulty::from_name_lossy(&name),
        None => prompt_difficulty(&mut input, &mut io::stdout())?
    };

    let screen = TerminalScreen::new(io::stdout());
    let mut controller = match cli.seed {
        Some(seed) => GameController::with_seed(difficulty, seed, screen),
        None => GameController::new(difficulty, screen)
    };
    info!(%difficulty, seed = ?cli.seed, "starting session");

    let state = game_loop(&mut controller, input)?;
    info!(?state, "session over");
    Ok(())
}
