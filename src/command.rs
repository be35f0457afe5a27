use crate::board::{BoardSize, Point};
use crate::error::{GameError, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Reveal(Point),
    Flag(Point),
    NewGame,
    Quit
}

impl Command {
    /// Parses one line of player input. Coordinates are typed 1-based and
    /// checked against `size` before anything touches the board.
    pub fn parse(raw: &str, size: BoardSize) -> Result<Command> {
        let lowered = raw.to_lowercase();
        let parts: Vec<&str> = lowered.split_whitespace().collect();
        let token = match parts.first() {
            None => return Err(GameError::EmptyCommand),
            Some(token) => *token
        };

        let make: fn(Point) -> Command = match token {
            "q" | "quit" => return Ok(Command::Quit),
            "n" => return Ok(Command::NewGame),
            "r" => Command::Reveal,
            "f" => Command::Flag,
            _ => return Err(GameError::UnknownAction(token.to_owned()))
        };

        if parts.len() != 3 {
            return Err(GameError::WrongArgumentCount {
                action: token.to_uppercase(),
                found: parts.len() - 1
            });
        }

        let row = parse_coordinate(parts[1])?.saturating_sub(1);
        let col = parse_coordinate(parts[2])?.saturating_sub(1);
        if !size.contains(row, col) {
            return Err(GameError::OutOfRange{rows: size.rows, cols: size.cols});
        }
        Ok(make(Point(row as usize, col as usize)))
    }
}

fn parse_coordinate(token: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|_| GameError::NotAnInteger(token.to_owned()))
}
