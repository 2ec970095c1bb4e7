use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BoardId, MalformedBoardData, MarkSet, Username};

/// Number of rows and columns of a board.
pub const BOARD_SIZE: usize = 5;

/// Row and column of the free cell.
pub const CENTER: usize = BOARD_SIZE / 2;

/// The fixed title of the free cell.
pub const FREE_TITLE: &str = "FREE";

/// The grid of a board, indexed by `[row][col]`.
pub type Cells = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// A single square on a bingo board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub title: String,
    pub is_marked: bool,
}

impl Cell {
    /// An unmarked cell without text.
    pub fn blank() -> Self {
        Self::default()
    }

    /// The center cell, which is always marked.
    pub fn free() -> Self {
        Self {
            title: String::from(FREE_TITLE),
            is_marked: true,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

pub fn is_center(row: usize, col: usize) -> bool {
    row == CENTER && col == CENTER
}

/// All `(row, col)` pairs of a board in row-major order.
pub fn positions() -> impl Iterator<Item = (usize, usize)> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
}

/// The grid of a freshly created board.
pub fn empty_cells() -> Cells {
    std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            if is_center(row, col) {
                Cell::free()
            } else {
                Cell::blank()
            }
        })
    })
}

/// A bingo board.
///
/// The grid itself is private, since the free cell in the center has to
/// stay `FREE` and marked. All changes go through the methods below, which
/// silently refuse anything that would break that; they return whether the
/// board actually changed, so that callers know when there is something to save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Assigned by the persistence layer on the first save.
    pub id: Option<BoardId>,
    pub title: String,
    cells: Cells,
    pub owner: Option<Username>,
    /// Whether other users may browse this board.
    pub is_public: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Board {
    /// Creates a board with blank, unmarked cells around the free cell.
    pub fn new(title: &str, owner: Option<Username>) -> Self {
        Self {
            id: None,
            title: String::from(title),
            cells: empty_cells(),
            owner,
            is_public: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Creates a board from an existing grid.
    ///
    /// Fails if the free cell is not exactly `FREE` and marked.
    pub fn from_cells(title: &str, cells: Cells) -> Result<Self, MalformedBoardData> {
        if cells[CENTER][CENTER] != Cell::free() {
            return Err(MalformedBoardData::FreeCellAltered);
        }
        let mut board = Self::new(title, None);
        board.cells = cells;
        Ok(board)
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Returns `None` for coordinates outside of the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub fn marks(&self) -> MarkSet {
        MarkSet::from_cells(&self.cells)
    }

    pub fn has_bingo(&self) -> bool {
        crate::has_bingo(&self.cells)
    }

    pub fn has_bingo_at(&self, row: usize, col: usize) -> bool {
        crate::has_bingo_at(&self.cells, row, col)
    }

    /// Changes the text of a cell and unmarks it.
    ///
    /// The new title is trimmed. Writing the same title again still clears the
    /// mark. The free cell cannot be edited.
    pub fn set_cell_title(&mut self, row: usize, col: usize, new_title: &str) -> bool {
        let Some(cell) = self.editable_cell(row, col) else {
            return false;
        };
        let new_title = new_title.trim();
        let changed = cell.is_marked || cell.title != new_title;
        cell.title = String::from(new_title);
        cell.is_marked = false;
        changed
    }

    /// Marks or unmarks a cell.
    ///
    /// Cells without a title cannot be marked, and the free cell cannot be unmarked.
    pub fn toggle_mark(&mut self, row: usize, col: usize) -> bool {
        let Some(cell) = self.editable_cell(row, col) else {
            return false;
        };
        if !cell.has_title() {
            return false;
        }
        cell.is_marked = !cell.is_marked;
        true
    }

    /// Unmarks every cell except the free cell, keeping the titles.
    pub fn reset(&mut self) -> bool {
        let mut changed = false;
        for (row, col) in positions() {
            if let Some(cell) = self.editable_cell(row, col) {
                changed |= cell.is_marked;
                cell.is_marked = false;
            }
        }
        changed
    }

    /// Like [`Self::reset()`], but also blanks all titles.
    pub fn clear(&mut self) -> bool {
        let mut changed = false;
        for (row, col) in positions() {
            if let Some(cell) = self.editable_cell(row, col) {
                changed |= *cell != Cell::blank();
                *cell = Cell::blank();
            }
        }
        changed
    }

    fn editable_cell(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if is_center(row, col) {
            return None;
        }
        self.cells.get_mut(row)?.get_mut(col)
    }
}
