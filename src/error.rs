use thiserror::Error;

/// Broad classes of rejected input. None of them end the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedCommand,
    InvalidCoordinate,
    IllegalAction,
    InvalidLayout
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Empty command. Please enter a command.")]
    EmptyCommand,
    #[error("Unknown command '{0}'.")]
    UnknownAction(String),
    #[error("Invalid command: '{action}' takes a row and a column.")]
    WrongArgumentCount{action: String, found: usize},
    #[error("Row and/or column not entered correctly.")]
    NotAnInteger(String),
    #[error("Out of range: rows are 1-{rows} and columns are 1-{cols}.")]
    OutOfRange{rows: usize, cols: usize},
    #[error("Already revealed. Cannot plant a flag here.")]
    AlreadyRevealed,
    #[error("All flags have been planted. No flags remaining.")]
    NoFlagsRemaining,
    #[error("Invalid mine layout: {0}")]
    InvalidLayout(String)
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            EmptyCommand | UnknownAction(_) | WrongArgumentCount{..} => ErrorKind::MalformedCommand,
            NotAnInteger(_) | OutOfRange{..} => ErrorKind::InvalidCoordinate,
            AlreadyRevealed | NoFlagsRemaining => ErrorKind::IllegalAction,
            InvalidLayout(_) => ErrorKind::InvalidLayout
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(GameError::EmptyCommand.kind(), ErrorKind::MalformedCommand);
        assert_eq!(GameError::UnknownAction("x".into()).kind(), ErrorKind::MalformedCommand);
        assert_eq!(GameError::NotAnInteger("a".into()).kind(), ErrorKind::InvalidCoordinate);
        assert_eq!(GameError::OutOfRange{rows: 9, cols: 9}.kind(), ErrorKind::InvalidCoordinate);
        assert_eq!(GameError::NoFlagsRemaining.kind(), ErrorKind::IllegalAction);
    }

    #[test]
    fn out_of_range_mentions_bounds() {
        let message = GameError::OutOfRange{rows: 16, cols: 30}.to_string();
        assert!(message.contains("1-16"));
        assert!(message.contains("1-30"));
    }
}
