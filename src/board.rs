use std::fmt;
use std::time::Instant;

use itertools::{iproduct, Itertools};
use rand::Rng;
use tracing::debug;

use crate::difficulty::{Difficulty, Preset};
use crate::error::{GameError, Result};
use crate::render;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Content {
    Mine,
    Empty
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub content: Content,
    pub mined_neighbor_count: u8,
    pub revealed: bool,
    pub flagged: bool
}

impl Cell {
    fn create_empty() -> Cell {
        Cell{content: Content::Empty, mined_neighbor_count: 0, revealed: false, flagged: false}
    }

    pub fn is_mine(&self) -> bool {
        self.content == Content::Mine
    }

    /// `None` marks a mine, which has no count of its own.
    pub fn adjacent_mines(&self) -> Option<u8> {
        match self.content {
            Content::Mine => None,
            Content::Empty => Some(self.mined_neighbor_count)
        }
    }
}

/// Zero-based (row, col).
#[derive(Debug, Eq, PartialEq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn distance(&self, other: &Point) -> usize{
        //l-inf norm, neighbors are exactly the points at distance 1
        (self.0 as i64 - other.0 as i64).abs().max((self.1 as i64 - other.1 as i64).abs()) as usize
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // players count from one
        write!(f, "({}, {})", self.0 + 1, self.1 + 1)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardSize {
    pub rows: usize,
    pub cols: usize
}

impl BoardSize {
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as u64) < self.rows as u64 && (col as u64) < self.cols as u64
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|x| self.point_from_integer(x)).collect()
    }

    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None
        }
        Some(Point(x/self.cols, x%self.cols))
    }
}

impl From<Preset> for BoardSize {
    fn from(preset: Preset) -> BoardSize {
        BoardSize{rows: preset.rows, cols: preset.cols}
    }
}

/// Face shown on the status line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Smiley {
    Neutral,
    Lost,
    Won
}

impl Smiley {
    pub fn icon(self) -> &'static str {
        match self {
            Smiley::Neutral => "🙂",
            Smiley::Lost => "☹️",
            Smiley::Won => "😎"
        }
    }
}

/// Mine layout plus the player's marks. Knows nothing about winning or losing.
#[derive(Debug, Clone)]
pub struct Board {
    size: BoardSize,
    field: Vec<Vec<Cell>>,
    mine_count: usize,
    flag_count: usize,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    smiley: Smiley
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render::render_board(self))
    }
}

impl Board {
    pub fn new(difficulty: Difficulty) -> Board {
        Board::with_rng(difficulty, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Board {
        let preset = difficulty.preset();
        let mut board = Board::new_from_size(preset.into(), preset.mines);
        board.place_mines(rng);
        board.calculate_numbers();
        debug!(%difficulty, rows = preset.rows, cols = preset.cols, mines = preset.mines, "generated board");
        board
    }

    /// Builds a board with a fixed mine layout.
    pub fn from_mine_points(size: BoardSize, mines: &[Point]) -> Result<Board> {
        if size.area() == 0 {
            return Err(GameError::InvalidLayout(String::from("board needs at least one row and column")))
        }
        if mines.is_empty() || mines.len() >= size.area() {
            return Err(GameError::InvalidLayout(format!(
                "{} mines do not fit a {}x{} board", mines.len(), size.rows, size.cols)))
        }
        if let Some(point) = mines.iter().find(|point| !size.contains(point.0 as i64, point.1 as i64)) {
            return Err(GameError::InvalidLayout(format!("mine at {} is off the board", point)))
        }
        if !mines.iter().all_unique() {
            return Err(GameError::InvalidLayout(String::from("duplicate mine position")))
        }

        let mut board = Board::new_from_size(size, mines.len());
        for point in mines {
            board.retrieve_cell_mutable(point).content = Content::Mine;
        }
        board.calculate_numbers();
        Ok(board)
    }

    fn new_from_size(size: BoardSize, mine_count: usize) -> Board {
        let mut field = Vec::with_capacity(size.rows);
        for _ in 0..size.rows {
            let mut row_vec = Vec::with_capacity(size.cols);
            for _ in 0..size.cols {
                row_vec.push(Cell::create_empty());
            }
            field.push(row_vec);
        }

        Board {
            size,
            field,
            mine_count,
            flag_count: 0,
            start_time: None,
            end_time: None,
            smiley: Smiley::Neutral
        }
    }

    /// Rejection sampling: draw cells until enough distinct ones are mined.
    /// Callers guarantee `mine_count < area`.
    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut placed = 0;
        while placed < self.mine_count {
            let point = Point(rng.gen_range(0..self.size.rows), rng.gen_range(0..self.size.cols));
            let cell = self.retrieve_cell_mutable(&point);
            if !cell.is_mine() {
                cell.content = Content::Mine;
                placed += 1;
            }
        }
    }

    fn calculate_numbers(&mut self) {
        for point in self.size.points() {
            if !self.is_mine(&point) {
                let count = self.count_adjacent_mines(&point);
                self.retrieve_cell_mutable(&point).mined_neighbor_count = count;
            }
        }
    }

    pub fn count_adjacent_mines(&self, point: &Point) -> u8 {
        self.neighbor_points(point).iter()
            .filter(|neighbor| self.is_mine(neighbor))
            .count() as u8
    }

    pub fn neighbor_points(&self, point: &Point) -> Vec<Point>{
        iproduct!(-1i64..=1, -1i64..=1)
            .filter(|&(i, j)| i != 0 || j != 0)
            .map(|(i, j)| (point.0 as i64 + i, point.1 as i64 + j))
            .filter(|&(row, col)| self.size.contains(row, col))
            .map(|(row, col)| Point(row as usize, col as usize))
            .collect()
    }

    /// Fresh random layout from the thread-local RNG.
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.reset_with_rng(difficulty, &mut rand::thread_rng());
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) {
        *self = Board::with_rng(difficulty, rng);
    }

    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop_timer(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Seconds between start and stop, to two decimals. 0.0 unless both happened.
    pub fn elapsed_time(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let seconds = end.saturating_duration_since(start).as_secs_f64();
                (seconds * 100.0).round() / 100.0
            }
            _ => 0.0
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn cols(&self) -> usize {
        self.size.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn flag_count(&self) -> usize {
        self.flag_count
    }

    pub fn flags_remaining(&self) -> usize {
        self.mine_count.saturating_sub(self.flag_count)
    }

    pub fn smiley(&self) -> Smiley {
        self.smiley
    }

    pub fn retrieve_cell(&self, point: &Point) -> &Cell{
        &self.field[point.0][point.1]
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell{
        &mut self.field[point.0][point.1]
    }

    pub fn is_mine(&self, point: &Point) -> bool {
        self.retrieve_cell(point).is_mine()
    }

    pub fn is_revealed(&self, point: &Point) -> bool {
        self.retrieve_cell(point).revealed
    }

    pub fn is_flagged(&self, point: &Point) -> bool {
        self.retrieve_cell(point).flagged
    }

    pub fn revealed_count(&self) -> usize {
        self.field.iter().flatten()
            .filter(|cell| cell.revealed)
            .count()
    }

    pub fn mine_points(&self) -> Vec<Point> {
        self.size.points().into_iter()
            .filter(|point| self.is_mine(point))
            .collect()
    }

    /// Returns false if the cell was already revealed.
    pub(crate) fn reveal_point(&mut self, point: &Point) -> bool {
        let cell = self.retrieve_cell_mutable(point);
        if cell.revealed {
            return false
        }
        cell.revealed = true;
        true
    }

    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.field.iter_mut().flatten().filter(|cell| cell.is_mine()) {
            cell.revealed = true;
        }
    }

    pub(crate) fn place_flag(&mut self, point: &Point) -> bool {
        let cell = self.retrieve_cell_mutable(point);
        if cell.flagged || cell.revealed {
            return false
        }
        cell.flagged = true;
        self.flag_count += 1;
        true
    }

    pub(crate) fn remove_flag(&mut self, point: &Point) -> bool {
        let cell = self.retrieve_cell_mutable(point);
        if !cell.flagged {
            return false
        }
        cell.flagged = false;
        self.flag_count -= 1;
        true
    }

    pub(crate) fn set_smiley(&mut self, smiley: Smiley) {
        self.smiley = smiley;
    }
}

#[cfg(test)]
use proptest::prelude::*;
