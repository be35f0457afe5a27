use std::io::Write;

use tracing::error;

use crate::board::{Board, Point};
use crate::controller::Event;

pub const INSTRUCTIONS: &str =
    "Use 'R row col' to reveal a cell, 'F row col' to place a flag, 'N' to reset the game, or 'Q' to quit.";

/// Whatever the player is looking at. The controller only ever hands it a
/// read-only board.
pub trait Screen {
    fn render(&mut self, board: &Board);
    fn report(&mut self, event: &Event);
    fn prompt(&mut self) {}
}

fn cell_symbol(board: &Board, point: &Point) -> String {
    let cell = board.retrieve_cell(point);
    if cell.flagged {
        return String::from("F")
    }
    if !cell.revealed {
        return String::from(".")
    }
    match cell.adjacent_mines() {
        None => String::from("×"),
        Some(count) => count.to_string()
    }
}

fn rule(cols: usize, left: &str, middle: &str, right: &str) -> String {
    format!("   {}{}───{}", left, format!("───{}", middle).repeat(cols.saturating_sub(1)), right)
}

/// Fixed-width grid with 1-based headers under a status line.
pub fn render_board(board: &Board) -> String {
    let cols = board.cols();
    let mut result = format!(
        "\n\tFlags remaining: {}    {}\n\n",
        board.flags_remaining(),
        board.smiley().icon()
    );

    let headers: Vec<String> = (1..=cols).map(|i| format!("{:^3}", i)).collect();
    result += &format!("    {}\n", headers.join(" "));
    result += &rule(cols, "┌", "┬", "┐");
    result += "\n";

    for i in 0..board.rows() {
        result += &format!("{:>2} │", i + 1);
        for j in 0..cols {
            result += &format!("{:^3}│", cell_symbol(board, &Point(i, j)));
        }
        result += "\n";
        if i + 1 < board.rows() {
            result += &rule(cols, "├", "┼", "┤");
        } else {
            result += &rule(cols, "└", "┴", "┘");
        }
        result += "\n";
    }
    result
}

/// Plain text on any writer, normally stdout.
pub struct TerminalScreen<W: Write> {
    out: W
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> TerminalScreen<W> {
        TerminalScreen{out}
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, text: &str) {
        let written = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(err) = written {
            error!(%err, "failed to write to the terminal");
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn render(&mut self, board: &Board) {
        let text = render_board(board);
        self.write_line(&text);
    }

    fn report(&mut self, event: &Event) {
        self.write_line(&event.to_string());
    }

    fn prompt(&mut self) {
        self.write_line(INSTRUCTIONS);
    }
}
