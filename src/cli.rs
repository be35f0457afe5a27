//! Command-line arguments for the console game.

use clap::Parser;

/// Console Minesweeper
#[derive(Parser, Debug)]
#[command(name = "minesweeper")]
#[command(about = "Turn-based Minesweeper in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// beginner, intermediate or expert. Prompted for when omitted.
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Seed for reproducible mine layouts
    #[arg(long)]
    pub seed: Option<u64>
}
