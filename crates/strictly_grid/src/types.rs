//! Core domain types for N×N tic-tac-toe.

use crate::error::{EngineError, EngineErrorKind};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Marks and cells
// ─────────────────────────────────────────────────────────────

/// Mark placed by a player. X always moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Coordinates
// ─────────────────────────────────────────────────────────────

/// Direction for cursor navigation over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

/// A 0-indexed (row, column) coordinate.
///
/// All row/column arithmetic lives here so that move handling and cursor
/// navigation share a single definition of the grid geometry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Decomposes a row-major flat index.
    pub fn from_index(index: usize, size: BoardSize) -> Self {
        let n = size.get();
        Self::new(index / n, index % n)
    }

    /// Row-major flat index of this coordinate.
    pub fn to_index(self, size: BoardSize) -> usize {
        self.row * size.get() + self.col
    }

    /// True if the coordinate lies on a board of the given size.
    pub fn is_within(self, size: BoardSize) -> bool {
        self.row < size.get() && self.col < size.get()
    }

    /// Steps one cell in `direction`.
    ///
    /// Returns `None` when the step would leave the board; there is no
    /// wrap-around between rows.
    #[instrument]
    pub fn step(self, direction: Direction, size: BoardSize) -> Option<Self> {
        let last = size.get() - 1;
        let next = match direction {
            Direction::Up => Self::new(self.row.checked_sub(1)?, self.col),
            Direction::Down if self.row < last => Self::new(self.row + 1, self.col),
            Direction::Left => Self::new(self.row, self.col.checked_sub(1)?),
            Direction::Right if self.col < last => Self::new(self.row, self.col + 1),
            Direction::Down | Direction::Right => return None,
        };
        next.is_within(size).then_some(next)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ─────────────────────────────────────────────────────────────
//  Board size
// ─────────────────────────────────────────────────────────────

/// Side length of the board, always within [`BoardSize::MIN`, `BoardSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BoardSize(usize);

impl BoardSize {
    /// Smallest supported board.
    pub const MIN: usize = 2;
    /// Largest supported board.
    pub const MAX: usize = 9;
    /// Size used when nothing else is configured.
    pub const DEFAULT: BoardSize = BoardSize(3);

    /// Validates a board size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineErrorKind::InvalidBoardSize`] if `n` is outside [2, 9].
    #[track_caller]
    pub fn try_new(n: usize) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(EngineError::new(EngineErrorKind::InvalidBoardSize(n)))
        }
    }

    /// Saturates `n` into the supported range.
    pub fn clamped(n: usize) -> Self {
        Self(n.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the side length.
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells on the board.
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }

    /// One size larger, stopping at the maximum.
    pub fn increment(self) -> Self {
        Self::clamped(self.0 + 1)
    }

    /// One size smaller, stopping at the minimum.
    pub fn decrement(self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = EngineError;

    #[track_caller]
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::try_new(n)
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.0, self.0)
    }
}

// ─────────────────────────────────────────────────────────────
//  Board
// ─────────────────────────────────────────────────────────────

/// Square N×N board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: BoardSize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.cell_count()],
        }
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Gets the cell at `coord`, or `None` if it is off the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        coord
            .is_within(self.size)
            .then(|| self.cells[coord.to_index(self.size)])
    }

    /// Sets the cell at `coord`. Off-board coordinates are ignored.
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        if coord.is_within(self.size) {
            let index = coord.to_index(self.size);
            self.cells[index] = cell;
        }
    }

    /// Checks if the cell at `coord` exists and is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.get())
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| c.mark() == Some(mark))
            .count()
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| Coord::from_index(i, self.size))
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.size.get();
        let separator = vec!["-"; n].join("+");
        for (r, row) in self.rows().enumerate() {
            let line = row
                .iter()
                .map(|cell| cell.mark().map_or_else(|| ".".to_string(), |m| m.to_string()))
                .collect::<Vec<_>>()
                .join("|");
            f.write_str(&line)?;
            if r + 1 < n {
                write!(f, "\n{}\n", separator)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn size(n: usize) -> BoardSize {
        BoardSize::try_new(n).unwrap()
    }

    #[test]
    fn test_board_size_bounds() {
        assert!(BoardSize::try_new(1).is_err());
        assert!(BoardSize::try_new(10).is_err());
        assert_eq!(BoardSize::try_new(2).unwrap().get(), 2);
        assert_eq!(BoardSize::try_new(9).unwrap().get(), 9);
        assert_eq!(BoardSize::default().get(), 3);
    }

    #[test]
    fn test_board_size_saturates() {
        assert_eq!(BoardSize::clamped(0).get(), 2);
        assert_eq!(BoardSize::clamped(42).get(), 9);
        assert_eq!(size(9).increment().get(), 9);
        assert_eq!(size(2).decrement().get(), 2);
        assert_eq!(size(4).increment().get(), 5);
        assert_eq!(size(4).decrement().get(), 3);
    }

    #[test]
    fn test_index_conversion() {
        let n = size(4);
        assert_eq!(Coord::from_index(6, n), Coord::new(1, 2));
        assert_eq!(Coord::new(3, 3).to_index(n), 15);
        for i in 0..n.cell_count() {
            assert_eq!(Coord::from_index(i, n).to_index(n), i);
        }
    }

    #[test]
    fn test_step_stays_on_board() {
        let n = size(3);
        assert_eq!(Coord::new(0, 0).step(Direction::Up, n), None);
        assert_eq!(Coord::new(0, 0).step(Direction::Left, n), None);
        assert_eq!(Coord::new(2, 2).step(Direction::Down, n), None);
        assert_eq!(Coord::new(2, 2).step(Direction::Right, n), None);
        // No wrap from the end of one row to the start of the next.
        assert_eq!(Coord::new(0, 2).step(Direction::Right, n), None);
        assert_eq!(Coord::new(1, 0).step(Direction::Left, n), None);
    }

    #[test]
    fn test_step_moves_one_cell() {
        let n = size(3);
        let center = Coord::new(1, 1);
        assert_eq!(center.step(Direction::Up, n), Some(Coord::new(0, 1)));
        assert_eq!(center.step(Direction::Down, n), Some(Coord::new(2, 1)));
        assert_eq!(center.step(Direction::Left, n), Some(Coord::new(1, 0)));
        assert_eq!(center.step(Direction::Right, n), Some(Coord::new(1, 2)));
        assert_eq!(Direction::iter().filter_map(|d| center.step(d, n)).count(), 4);
    }

    #[test]
    fn test_board_get_out_of_range() {
        let board = Board::new(size(3));
        assert_eq!(board.get(Coord::new(3, 0)), None);
        assert_eq!(board.get(Coord::new(0, 3)), None);
        assert_eq!(board.get(Coord::new(2, 2)), Some(Cell::Empty));
        assert!(!board.is_empty(Coord::new(5, 0)));
    }

    #[test]
    fn test_board_counts() {
        let mut board = Board::new(size(3));
        board.set(Coord::new(0, 0), Cell::Occupied(Mark::X));
        board.set(Coord::new(1, 1), Cell::Occupied(Mark::O));
        board.set(Coord::new(2, 2), Cell::Occupied(Mark::X));
        assert_eq!(board.occupied_count(), 3);
        assert_eq!(board.count(Mark::X), 2);
        assert_eq!(board.count(Mark::O), 1);
        assert_eq!(board.empty_cells().len(), 6);
    }

    #[test]
    fn test_cell_mark() {
        assert_eq!(Cell::Empty.mark(), None);
        assert_eq!(Cell::Occupied(Mark::O).mark(), Some(Mark::O));
    }

    #[test]
    fn test_board_display() {
        let mut board = Board::new(size(2));
        board.set(Coord::new(0, 1), Cell::Occupied(Mark::X));
        board.set(Coord::new(1, 0), Cell::Occupied(Mark::O));
        assert_eq!(board.to_string(), ".|X\n-+-\nO|.");
    }

    #[test]
    fn test_board_size_deserialize_rejects_out_of_range() {
        assert!(size_from_toml("12").is_err());
        assert_eq!(size_from_toml("5").unwrap().get(), 5);
    }

    fn size_from_toml(raw: &str) -> Result<BoardSize, toml::de::Error> {
        #[derive(Deserialize)]
        struct Wrapper {
            size: BoardSize,
        }
        toml::from_str::<Wrapper>(&format!("size = {}", raw)).map(|w| w.size)
    }
}
