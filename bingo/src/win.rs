//! Bingo detection.
//!
//! A line is complete when every one of its cells is marked. There are
//! `2 * BOARD_SIZE + 2` lines: every row, every column and both diagonals.
//! The free cell is simply a marked cell here.

use crate::marks::bit;
use crate::{Cells, MarkSet, BOARD_SIZE};

/// One of the lines that wins the game when fully marked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// From the top left to the bottom right corner.
    Diagonal,
    /// From the top right to the bottom left corner.
    AntiDiagonal,
}

const fn row_masks() -> [u64; BOARD_SIZE] {
    let mut masks = [0; BOARD_SIZE];
    let mut row = 0;
    while row < BOARD_SIZE {
        let mut col = 0;
        while col < BOARD_SIZE {
            masks[row] |= bit(row, col);
            col += 1;
        }
        row += 1;
    }
    masks
}

const fn column_masks() -> [u64; BOARD_SIZE] {
    let mut masks = [0; BOARD_SIZE];
    let mut col = 0;
    while col < BOARD_SIZE {
        let mut row = 0;
        while row < BOARD_SIZE {
            masks[col] |= bit(row, col);
            row += 1;
        }
        col += 1;
    }
    masks
}

const fn diagonal_masks() -> (u64, u64) {
    let mut diagonal = 0;
    let mut anti_diagonal = 0;
    let mut i = 0;
    while i < BOARD_SIZE {
        diagonal |= bit(i, i);
        anti_diagonal |= bit(i, BOARD_SIZE - 1 - i);
        i += 1;
    }
    (diagonal, anti_diagonal)
}

const ROW_MASKS: [u64; BOARD_SIZE] = row_masks();
const COLUMN_MASKS: [u64; BOARD_SIZE] = column_masks();
const DIAGONAL_MASKS: (u64, u64) = diagonal_masks();

impl Line {
    /// All lines of a board: rows first, then columns, then the diagonals.
    pub fn all() -> impl Iterator<Item = Line> {
        (0..BOARD_SIZE)
            .map(Line::Row)
            .chain((0..BOARD_SIZE).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// The lines that pass through a cell, at most four.
    ///
    /// This is empty for coordinates outside of the board.
    pub fn through(row: usize, col: usize) -> impl Iterator<Item = Line> {
        let in_bounds = row < BOARD_SIZE && col < BOARD_SIZE;
        [
            in_bounds.then_some(Line::Row(row)),
            in_bounds.then_some(Line::Column(col)),
            (in_bounds && row == col).then_some(Line::Diagonal),
            (in_bounds && row + col == BOARD_SIZE - 1).then_some(Line::AntiDiagonal),
        ]
        .into_iter()
        .flatten()
    }

    /// The cells of this line as a set.
    pub fn mask(self) -> MarkSet {
        let bits = match self {
            Line::Row(row) => ROW_MASKS[row],
            Line::Column(col) => COLUMN_MASKS[col],
            Line::Diagonal => DIAGONAL_MASKS.0,
            Line::AntiDiagonal => DIAGONAL_MASKS.1,
        };
        MarkSet::from_bits(bits)
    }

    /// The `(row, col)` pairs on this line.
    pub fn positions(self) -> impl Iterator<Item = (usize, usize)> {
        (0..BOARD_SIZE).map(move |i| match self {
            Line::Row(row) => (row, i),
            Line::Column(col) => (i, col),
            Line::Diagonal => (i, i),
            Line::AntiDiagonal => (i, BOARD_SIZE - 1 - i),
        })
    }

    pub fn is_complete(self, marks: MarkSet) -> bool {
        marks.is_superset(self.mask())
    }

    /// Same as [`Self::is_complete()`], but reads the grid directly.
    ///
    /// This only touches the cells on the line.
    pub fn is_complete_in(self, cells: &Cells) -> bool {
        self.positions().all(|(row, col)| cells[row][col].is_marked)
    }
}

/// Is any row, column or diagonal fully marked?
pub fn has_bingo(cells: &Cells) -> bool {
    let marks = MarkSet::from_cells(cells);
    Line::all().any(|line| line.is_complete(marks))
}

/// Is any line through `(row, col)` fully marked?
///
/// Checking every position this way gives the same answer as [`has_bingo()`],
/// but after a single cell changed, only the lines through it can have been
/// completed.
pub fn has_bingo_at(cells: &Cells, row: usize, col: usize) -> bool {
    Line::through(row, col).any(|line| line.is_complete_in(cells))
}

/// All fully marked lines, in the order of [`Line::all()`].
pub fn completed_lines(cells: &Cells) -> Vec<Line> {
    let marks = MarkSet::from_cells(cells);
    Line::all().filter(|line| line.is_complete(marks)).collect()
}
