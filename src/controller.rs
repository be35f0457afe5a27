use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::board::{Board, Point, Smiley};
use crate::command::Command;
use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::render::Screen;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
    Quit
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// Things the player is told, apart from the board itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Farewell,
    Restarting,
    Rejected(GameError),
    Lost{elapsed: f64},
    Won{elapsed: f64}
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Farewell => write!(f, "Thanks for playing!"),
            Event::Restarting => write!(f, "Restarting the game."),
            Event::Rejected(err) => write!(f, "{}", err),
            Event::Lost{elapsed} => write!(f, "Boom!\nTime passed: {:.2} seconds", elapsed),
            Event::Won{elapsed} => write!(
                f,
                "Congratulations! You cleared all the mines!\nTime passed: {:.2} seconds",
                elapsed
            )
        }
    }
}

/// Owns the board for one session and applies the rules to it.
pub struct GameController<S: Screen> {
    board: Board,
    difficulty: Difficulty,
    rng: StdRng,
    first_move_done: bool,
    running: bool,
    state: GameState,
    screen: S
}

impl<S: Screen> GameController<S> {
    pub fn new(difficulty: Difficulty, screen: S) -> GameController<S> {
        GameController::with_rng(difficulty, StdRng::from_entropy(), screen)
    }

    /// Same seed, same sequence of mine layouts.
    pub fn with_seed(difficulty: Difficulty, seed: u64, screen: S) -> GameController<S> {
        GameController::with_rng(difficulty, StdRng::seed_from_u64(seed), screen)
    }

    /// Starts on a prepared board. New games still get random layouts.
    pub fn with_board(difficulty: Difficulty, board: Board, screen: S) -> GameController<S> {
        GameController::from_parts(difficulty, board, StdRng::from_entropy(), screen)
    }

    fn with_rng(difficulty: Difficulty, mut rng: StdRng, screen: S) -> GameController<S> {
        let board = Board::with_rng(difficulty, &mut rng);
        GameController::from_parts(difficulty, board, rng, screen)
    }

    fn from_parts(difficulty: Difficulty, board: Board, rng: StdRng, screen: S) -> GameController<S> {
        GameController {
            board,
            difficulty,
            rng,
            first_move_done: false,
            running: true,
            state: GameState::Playing,
            screen
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn first_move_done(&self) -> bool {
        self.first_move_done
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Shows the opening board.
    pub fn begin(&mut self) {
        self.screen.render(&self.board);
    }

    /// Handles one line of input and returns the resulting state. Input is
    /// ignored once the game has ended.
    pub fn process_turn(&mut self, raw_command: &str) -> GameState {
        if self.state.is_terminal() {
            debug!(state = ?self.state, "game over, ignoring input");
            return self.state;
        }

        let command = match Command::parse(raw_command, self.board.size()) {
            Ok(command) => command,
            Err(err) => {
                self.reject(err);
                return self.state;
            }
        };
        debug!(?command, "processing turn");

        match command {
            Command::Quit => {
                self.state = GameState::Quit;
                self.running = false;
                info!("player quit");
                self.screen.report(&Event::Farewell);
            }
            Command::NewGame => {
                self.screen.report(&Event::Restarting);
                self.new_game();
            }
            Command::Reveal(point) => {
                if !self.first_move_done {
                    self.board.start_timer();
                    self.first_move_done = true;
                }
                self.reveal_cell(point);
            }
            Command::Flag(point) => {
                if let Err(err) = self.toggle_flag(point) {
                    self.reject(err);
                }
            }
        }

        if self.running {
            self.screen.render(&self.board);
        }
        self.state
    }

    /// Replaces the board with a fresh one at the current difficulty.
    pub fn new_game(&mut self) {
        self.board = Board::with_rng(self.difficulty, &mut self.rng);
        self.first_move_done = false;
        self.running = true;
        self.state = GameState::Playing;
        info!(difficulty = %self.difficulty, "new game");
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.new_game();
    }

    /// Flagged and revealed cells are left alone. A mine ends the game,
    /// anything else opens the connected safe region breadth-first.
    pub fn reveal_cell(&mut self, point: Point) {
        if self.state.is_terminal() || self.board.is_revealed(&point) || self.board.is_flagged(&point) {
            return;
        }

        if self.board.is_mine(&point) {
            self.board.reveal_all_mines();
            self.finish(GameState::Lost);
            return;
        }

        let mut queue = VecDeque::new();
        queue.push_back(point);
        let mut opened = 0;
        while let Some(current) = queue.pop_front() {
            if !self.board.reveal_point(&current) {
                continue;
            }
            opened += 1;
            if self.board.retrieve_cell(&current).adjacent_mines() != Some(0) {
                continue;
            }
            for neighbor in self.board.neighbor_points(&current) {
                if !self.board.is_revealed(&neighbor) && !self.board.is_flagged(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        debug!(%point, opened, "revealed region");
        self.check_win();
    }

    pub fn toggle_flag(&mut self, point: Point) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        if self.board.is_revealed(&point) {
            return Err(GameError::AlreadyRevealed);
        }

        if self.board.is_flagged(&point) {
            self.board.remove_flag(&point);
        } else if self.board.flag_count() >= self.board.mine_count() {
            return Err(GameError::NoFlagsRemaining);
        } else {
            self.board.place_flag(&point);
        }
        debug!(%point, flags = self.board.flag_count(), "toggled flag");
        self.check_win();
        Ok(())
    }

    /// Won once every safe cell is revealed. Flags don't matter.
    pub fn check_win(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let clear_total = self.board.size().area() - self.board.mine_count();
        if self.board.revealed_count() != clear_total {
            return false;
        }
        self.finish(GameState::Won);
        true
    }

    fn finish(&mut self, outcome: GameState) {
        self.board.stop_timer();
        self.board.set_smiley(if outcome == GameState::Won { Smiley::Won } else { Smiley::Lost });
        self.state = outcome;
        self.running = false;

        let elapsed = self.board.elapsed_time();
        info!(?outcome, elapsed, "game over");
        self.screen.render(&self.board);
        let event = match outcome {
            GameState::Won => Event::Won{elapsed},
            _ => Event::Lost{elapsed}
        };
        self.screen.report(&event);
    }

    fn reject(&mut self, err: GameError) {
        debug!(%err, kind = ?err.kind(), "rejected");
        self.screen.report(&Event::Rejected(err));
    }
}
