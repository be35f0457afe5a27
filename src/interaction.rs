use std::io::{self, BufRead, Write};

use strum::IntoEnumIterator;
use tracing::info;

use super::difficulty::Difficulty;

/// Asks once for a level. Anything unrecognised, including end of input,
/// means beginner.
pub fn prompt_difficulty<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Difficulty> {
    let names: Vec<String> = Difficulty::iter().map(|difficulty| difficulty.to_string()).collect();
    writeln!(output, "Please select a difficulty level: {}", names.join(", "))?;
    output.flush()?;

    let difficulty = match read_line(input)? {
        Some(line) => Difficulty::from_name_lossy(&line),
        None => Difficulty::default()
    };
    info!(%difficulty, "difficulty selected");
    Ok(difficulty)
}

/// `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line))
    }
}

#[cfg(test)]
mod interaction_tests {
    use super::*;
    use std::io::Cursor;

    fn select(text: &str) -> Difficulty {
        let mut output = Vec::new();
        prompt_difficulty(&mut Cursor::new(text), &mut output).unwrap()
    }

    #[test]
    fn picks_named_level() {
        assert_eq!(select("expert\n"), Difficulty::Expert);
        assert_eq!(select("Intermediate\n"), Difficulty::Intermediate);
    }

    #[test]
    fn falls_back_to_beginner() {
        assert_eq!(select("hard\n"), Difficulty::Beginner);
        assert_eq!(select(""), Difficulty::Beginner);
    }

    #[test]
    fn lists_levels_in_prompt() {
        let mut output = Vec::new();
        prompt_difficulty(&mut Cursor::new("\n"), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("beginner, intermediate, expert"));
    }

    #[test]
    fn read_line_reports_end_of_input() {
        let mut input = Cursor::new("r 1 1\n");
        assert_eq!(read_line(&mut input).unwrap(), Some(String::from("r 1 1\n")));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }
}
