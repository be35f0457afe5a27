pub mod board;
pub mod command;
pub mod controller;
pub mod difficulty;
pub mod error;
pub mod render;
mod interaction;

use std::io::{self, BufRead};

use tracing::debug;

pub use board::{Board, BoardSize, Point, Smiley};
pub use command::Command;
pub use controller::{Event, GameController, GameState};
pub use difficulty::{Difficulty, Preset};
pub use error::{ErrorKind, GameError};
pub use interaction::prompt_difficulty;
pub use render::{render_board, Screen, TerminalScreen};

/// Reads commands until the game is won, lost or quit. Running out of input
/// counts as quitting.
pub fn game_loop<S: Screen, R: BufRead>(controller: &mut GameController<S>, mut input: R) -> io::Result<GameState> {
    controller.begin();
    while controller.is_running() {
        controller.screen_mut().prompt();
        let state = match interaction::read_line(&mut input)? {
            Some(line) => controller.process_turn(&line),
            None => {
                debug!("end of input");
                controller.process_turn("quit")
            }
        };
        if state.is_terminal() {
            break;
        }
    }
    Ok(controller.state())
}

#[cfg(test)]
mod game_loop_tests {
    use super::*;
    use crate::controller::controller_tests::{beginner_layout, RecordingScreen};
    use std::io::Cursor;

    fn controller() -> GameController<RecordingScreen> {
        GameController::with_board(Difficulty::Beginner, beginner_layout(), RecordingScreen::default())
    }

    #[test]
    fn stops_on_loss() {
        let mut game = controller();
        let input = Cursor::new("F 2 2\nR 1 1\nR 3 3\n");
        assert_eq!(game_loop(&mut game, input).unwrap(), GameState::Lost);
        assert_eq!(game.screen().prompts, 2);
        assert_eq!(game.board().flag_count(), 1);
    }

    #[test]
    fn bad_input_keeps_the_loop_going() {
        let mut game = controller();
        let input = Cursor::new("hello\nR 1\nR 99 1\nq\n");
        assert_eq!(game_loop(&mut game, input).unwrap(), GameState::Quit);
        assert_eq!(game.screen().prompts, 4);
        assert_eq!(game.screen().events.len(), 4);
        assert_eq!(game.screen().events.last(), Some(&Event::Farewell));
    }

    #[test]
    fn end_of_input_quits() {
        let mut game = controller();
        assert_eq!(game_loop(&mut game, Cursor::new("R 2 2\n")).unwrap(), GameState::Quit);
        assert!(game.first_move_done());
        // opening render plus one after the reveal
        assert_eq!(game.screen().renders, 2);
    }

    #[test]
    fn plays_to_a_win_on_a_terminal_screen() {
        let board = Board::from_mine_points(BoardSize{rows: 3, cols: 3}, &[Point(2, 2)]).unwrap();
        let mut game = GameController::with_board(Difficulty::Beginner, board, TerminalScreen::new(Vec::new()));
        assert_eq!(game_loop(&mut game, Cursor::new("r 1 1\n")).unwrap(), GameState::Won);
        let output = String::from_utf8(game.screen().get_ref().clone()).unwrap();
        assert!(output.contains("Congratulations!"));
        assert!(output.contains("😎"));
    }
}
