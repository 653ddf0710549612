//! Win detection for N×N boards.
//!
//! A mark wins by filling an entire row, column, or one of the two long
//! diagonals. Lines are always checked in the same priority order (rows,
//! columns, main diagonal, anti-diagonal) and only the first completed line
//! is reported, even when a single move completes two lines at once.

use crate::types::{Board, BoardSize, Cell, Coord, Mark};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A line of length N that wins when filled by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// Row `r`, cells (r, 0) … (r, N-1).
    Row(usize),
    /// Column `c`, cells (0, c) … (N-1, c).
    Column(usize),
    /// Main diagonal, cells (i, i).
    Diagonal,
    /// Anti-diagonal, cells (i, N-1-i).
    AntiDiagonal,
}

impl Line {
    /// Coordinates of the line on a board of `size`, in ascending row order.
    pub fn cells(self, size: BoardSize) -> impl Iterator<Item = Coord> {
        let n = size.get();
        (0..n).map(move |i| match self {
            Line::Row(r) => Coord::new(r, i),
            Line::Column(c) => Coord::new(i, c),
            Line::Diagonal => Coord::new(i, i),
            Line::AntiDiagonal => Coord::new(i, n - 1 - i),
        })
    }

    /// Every line on the board, in priority order.
    pub fn all(size: BoardSize) -> impl Iterator<Item = Line> {
        let n = size.get();
        (0..n)
            .map(Line::Row)
            .chain((0..n).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Lines passing through `coord`, in priority order.
    ///
    /// Empty when `coord` is off the board.
    pub fn through(coord: Coord, size: BoardSize) -> Vec<Line> {
        if !coord.is_within(size) {
            return Vec::new();
        }
        let mut lines = vec![Line::Row(coord.row), Line::Column(coord.col)];
        if coord.row == coord.col {
            lines.push(Line::Diagonal);
        }
        if coord.row + coord.col == size.get() - 1 {
            lines.push(Line::AntiDiagonal);
        }
        lines
    }
}

/// A completed line, with the cells to highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WinningLine {
    /// Which line was completed.
    line: Line,
    /// The N coordinates of the line.
    cells: Vec<Coord>,
}

/// Returns the line if every one of its cells holds `mark`.
fn completed(board: &Board, mark: Mark, line: Line) -> Option<WinningLine> {
    let size = board.size();
    line.cells(size)
        .all(|coord| board.get(coord) == Some(Cell::Occupied(mark)))
        .then(|| WinningLine {
            line,
            cells: line.cells(size).collect(),
        })
}

/// Scans the whole board for a line completed by `mark`.
///
/// Returns the first completed line in priority order, or `None`.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, mark: Mark) -> Option<WinningLine> {
    Line::all(board.size()).find_map(|line| completed(board, mark, line))
}

/// Checks only the lines through `last`.
///
/// When `mark` had no completed line before its move at `last`, any line it
/// completes must pass through `last`, so this agrees with [`winning_line`]
/// at O(N) cost.
#[instrument(skip(board))]
pub fn winning_line_through(board: &Board, mark: Mark, last: Coord) -> Option<WinningLine> {
    Line::through(last, board.size())
        .into_iter()
        .find_map(|line| completed(board, mark, line))
}

/// Returns the mark holding a completed line, if any.
///
/// X is checked before O.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    Mark::iter().find(|mark| winning_line(board, *mark).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> BoardSize {
        BoardSize::try_new(n).unwrap()
    }

    fn fill(board: &mut Board, coords: impl IntoIterator<Item = Coord>, mark: Mark) {
        for coord in coords {
            board.set(coord, Cell::Occupied(mark));
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(size(3));
        assert_eq!(winning_line(&board, Mark::X), None);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_line_order() {
        let lines: Vec<_> = Line::all(size(2)).collect();
        assert_eq!(
            lines,
            vec![
                Line::Row(0),
                Line::Row(1),
                Line::Column(0),
                Line::Column(1),
                Line::Diagonal,
                Line::AntiDiagonal,
            ]
        );
    }

    #[test]
    fn test_anti_diagonal_cells() {
        let cells: Vec<_> = Line::AntiDiagonal.cells(size(4)).collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(0, 3),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(3, 0)
            ]
        );
    }

    #[test]
    fn test_lines_through_center() {
        let lines = Line::through(Coord::new(1, 1), size(3));
        assert_eq!(
            lines,
            vec![
                Line::Row(1),
                Line::Column(1),
                Line::Diagonal,
                Line::AntiDiagonal
            ]
        );
        assert!(Line::through(Coord::new(3, 0), size(3)).is_empty());
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new(size(3));
        fill(&mut board, Line::Row(0).cells(size(3)), Mark::X);
        let win = winning_line(&board, Mark::X).unwrap();
        assert_eq!(*win.line(), Line::Row(0));
        assert_eq!(
            win.cells(),
            &vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
        );
        assert_eq!(winning_line(&board, Mark::O), None);
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new(size(5));
        fill(&mut board, Line::AntiDiagonal.cells(size(5)), Mark::O);
        let win = winning_line(&board, Mark::O).unwrap();
        assert_eq!(*win.line(), Line::AntiDiagonal);
        assert_eq!(win.cells().len(), 5);
    }

    #[test]
    fn test_row_beats_diagonal() {
        // X completes both row 0 and the main diagonal.
        let mut board = Board::new(size(3));
        fill(&mut board, Line::Row(0).cells(size(3)), Mark::X);
        fill(&mut board, Line::Diagonal.cells(size(3)), Mark::X);
        let win = winning_line(&board, Mark::X).unwrap();
        assert_eq!(*win.line(), Line::Row(0));
        let through = winning_line_through(&board, Mark::X, Coord::new(0, 0)).unwrap();
        assert_eq!(*through.line(), Line::Row(0));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new(size(3));
        fill(&mut board, [Coord::new(0, 0), Coord::new(0, 1)], Mark::X);
        assert_eq!(winning_line(&board, Mark::X), None);
        assert_eq!(winning_line_through(&board, Mark::X, Coord::new(0, 1)), None);
    }

    #[test]
    fn test_through_ignores_lines_elsewhere() {
        let mut board = Board::new(size(3));
        fill(&mut board, Line::Column(2).cells(size(3)), Mark::O);
        assert_eq!(winning_line_through(&board, Mark::O, Coord::new(1, 0)), None);
        assert!(winning_line_through(&board, Mark::O, Coord::new(1, 2)).is_some());
    }
}
