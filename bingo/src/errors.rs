/// The error type for turning a stored [`BoardDocument`](crate::BoardDocument) back into a
/// [`Board`](crate::Board).
///
/// Corrupt documents are reported instead of being replaced by a blank board,
/// so the caller can decide whether to retry, skip, or start over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedBoardData {
    MissingTitle,
    WrongRowCount {
        found: usize,
    },
    WrongColumnCount {
        row: usize,
        found: usize,
    },
    InvalidColumnKey {
        row: usize,
        key: String,
    },
    DuplicateColumn {
        row: usize,
        col: usize,
    },
    MissingCellField {
        row: usize,
        col: usize,
        field: &'static str,
    },
    FreeCellAltered,
    InvalidOwner,
}

impl std::error::Error for MalformedBoardData {}

impl std::fmt::Display for MalformedBoardData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedBoardData::MissingTitle => write!(f, "Board has no title"),
            MalformedBoardData::WrongRowCount { found } => write!(
                f,
                "Board has {} rows, expected {}",
                found,
                crate::BOARD_SIZE
            ),
            MalformedBoardData::WrongColumnCount { row, found } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row,
                found,
                crate::BOARD_SIZE
            ),
            MalformedBoardData::InvalidColumnKey { row, key } => {
                write!(f, "Row {} has a cell under the invalid key {:?}", row, key)
            }
            MalformedBoardData::DuplicateColumn { row, col } => {
                write!(f, "Row {} has more than one cell for column {}", row, col)
            }
            MalformedBoardData::MissingCellField { row, col, field } => {
                write!(f, "Cell ({}, {}) is missing its {}", row, col, field)
            }
            MalformedBoardData::FreeCellAltered => write!(
                f,
                "The center cell must be \"{}\" and marked",
                crate::FREE_TITLE
            ),
            MalformedBoardData::InvalidOwner => write!(f, "Board has an invalid owner"),
        }
    }
}
