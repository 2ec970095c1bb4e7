use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Board, Cell, Cells, MalformedBoardData, Username, BOARD_SIZE};

/// A board as it is kept in the document store.
///
/// Each row is a map from the stringified column index (`"0"`, `"1"`, ...)
/// to the cell. The keys are parsed back into numbers when reading, so the
/// order they arrive in does not matter.
///
/// Everything is optional on the way in, so that missing data turns into a
/// [`MalformedBoardData`] when converting to a [`Board`], rather than a
/// generic deserialization error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    #[serde(default)]
    pub title: Option<String>,
    /// The owner's username. The spelling is what existing documents use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creater: Option<String>,
    #[serde(default)]
    pub cells: Vec<BTreeMap<String, CellDocument>>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single cell inside a [`BoardDocument`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_marked: Option<bool>,
}

impl From<&Cell> for CellDocument {
    fn from(cell: &Cell) -> Self {
        Self {
            title: Some(cell.title.clone()),
            is_marked: Some(cell.is_marked),
        }
    }
}

impl From<&Board> for BoardDocument {
    fn from(board: &Board) -> Self {
        let cells = board
            .cells()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, cell)| (col.to_string(), CellDocument::from(cell)))
                    .collect()
            })
            .collect();
        Self {
            title: Some(board.title.clone()),
            creater: board.owner.as_ref().map(|owner| String::from(owner.as_str())),
            cells,
            is_public: board.is_public,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

impl TryFrom<BoardDocument> for Board {
    type Error = MalformedBoardData;

    /// The id is not part of the document, so the result has none.
    fn try_from(doc: BoardDocument) -> Result<Self, Self::Error> {
        let title = doc.title.ok_or(MalformedBoardData::MissingTitle)?;
        let cells = parse_cells(doc.cells)?;
        let mut board = Board::from_cells(&title, cells)?;
        // An empty owner shows up in documents written before the owner was known
        board.owner = match doc.creater.as_deref() {
            None | Some("") => None,
            Some(name) => Some(Username::new(name).map_err(|_| MalformedBoardData::InvalidOwner)?),
        };
        board.is_public = doc.is_public;
        board.created_at = doc.created_at;
        board.updated_at = doc.updated_at;
        Ok(board)
    }
}

fn parse_cells(rows: Vec<BTreeMap<String, CellDocument>>) -> Result<Cells, MalformedBoardData> {
    if rows.len() != BOARD_SIZE {
        return Err(MalformedBoardData::WrongRowCount { found: rows.len() });
    }
    let mut grid: [[Option<Cell>; BOARD_SIZE]; BOARD_SIZE] = Default::default();
    for (row, cells_in_row) in rows.into_iter().enumerate() {
        if cells_in_row.len() != BOARD_SIZE {
            return Err(MalformedBoardData::WrongColumnCount {
                row,
                found: cells_in_row.len(),
            });
        }
        for (key, cell_doc) in cells_in_row {
            let col = match key.parse::<usize>() {
                Ok(col) if col < BOARD_SIZE => col,
                _ => return Err(MalformedBoardData::InvalidColumnKey { row, key }),
            };
            if grid[row][col].is_some() {
                return Err(MalformedBoardData::DuplicateColumn { row, col });
            }
            let title = cell_doc.title.ok_or(MalformedBoardData::MissingCellField {
                row,
                col,
                field: "title",
            })?;
            let is_marked = cell_doc
                .is_marked
                .ok_or(MalformedBoardData::MissingCellField {
                    row,
                    col,
                    field: "isMarked",
                })?;
            grid[row][col] = Some(Cell { title, is_marked });
        }
    }
    // Exactly BOARD_SIZE distinct in-range keys per row, so every slot is filled
    Ok(grid.map(|row| row.map(Option::unwrap_or_default)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{empty_cells, CENTER};

    fn stored_row(cells: &[(&str, &str, bool)]) -> serde_json::Value {
        let mut row = serde_json::Map::new();
        for &(key, title, is_marked) in cells {
            row.insert(
                String::from(key),
                json!({ "title": title, "isMarked": is_marked }),
            );
        }
        serde_json::Value::Object(row)
    }

    fn stored_board() -> serde_json::Value {
        let blank_row = || {
            stored_row(&[
                ("0", "", false),
                ("1", "", false),
                ("2", "", false),
                ("3", "", false),
                ("4", "", false),
            ])
        };
        json!({
            "title": "Family dinner",
            "creater": "alice",
            "cells": [
                blank_row(),
                blank_row(),
                stored_row(&[
                    ("0", "", false),
                    ("1", "", false),
                    ("2", "FREE", true),
                    ("3", "", false),
                    ("4", "", false),
                ]),
                blank_row(),
                blank_row(),
            ],
            "isPublic": true,
            "createdAt": "2025-06-05T12:00:00Z",
        })
    }

    fn decode(value: serde_json::Value) -> Result<Board, MalformedBoardData> {
        let doc: BoardDocument = serde_json::from_value(value).unwrap();
        Board::try_from(doc)
    }

    #[test]
    fn decodes_stored_board() {
        let board = decode(stored_board()).unwrap();
        assert_eq!(board.title, "Family dinner");
        assert_eq!(board.owner, Username::new("alice").ok());
        assert!(board.is_public);
        assert!(board.created_at.is_some());
        assert!(board.updated_at.is_none());
        assert_eq!(board.cells(), &empty_cells());
    }

    #[test]
    fn column_keys_are_placed_numerically() {
        let mut value = stored_board();
        value["cells"][0] = stored_row(&[
            ("4", "e", false),
            ("2", "c", false),
            ("0", "a", true),
            ("3", "d", false),
            ("1", "b", false),
        ]);
        let board = decode(value).unwrap();
        let titles: Vec<&str> = board.cells()[0].iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d", "e"]);
        assert!(board.cell(0, 0).unwrap().is_marked);
    }

    #[test]
    fn encoding_uses_string_keys() {
        let mut board = Board::new("Trip", Username::new("bob").ok());
        board.set_cell_title(1, 3, "Flat tire");
        let value = serde_json::to_value(BoardDocument::from(&board)).unwrap();
        assert_eq!(value["cells"][1]["3"], json!({ "title": "Flat tire", "isMarked": false }));
        assert_eq!(value["creater"], json!("bob"));
        assert_eq!(value["isPublic"], json!(false));
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn stored_and_loaded_board_is_unchanged() {
        let mut board = Board::new("Trip", Username::new("bob").ok());
        board.set_cell_title(3, 0, "Wrong turn");
        board.toggle_mark(3, 0);
        let json = serde_json::to_string(&BoardDocument::from(&board)).unwrap();
        let doc: BoardDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(Board::try_from(doc).unwrap(), board);
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut value = stored_board();
        value.as_object_mut().unwrap().remove("title");
        assert_eq!(decode(value), Err(MalformedBoardData::MissingTitle));

        let mut value = stored_board();
        value["cells"][3]["1"] = json!({ "title": "x" });
        assert_eq!(
            decode(value),
            Err(MalformedBoardData::MissingCellField {
                row: 3,
                col: 1,
                field: "isMarked"
            })
        );
    }

    #[test]
    fn wrong_shapes_are_reported() {
        let mut value = stored_board();
        value["cells"].as_array_mut().unwrap().pop();
        assert_eq!(decode(value), Err(MalformedBoardData::WrongRowCount { found: 4 }));

        let mut value = stored_board();
        value["cells"][1].as_object_mut().unwrap().remove("2");
        assert_eq!(
            decode(value),
            Err(MalformedBoardData::WrongColumnCount { row: 1, found: 4 })
        );

        let mut value = stored_board();
        let row = value["cells"][4].as_object_mut().unwrap();
        row.remove("4");
        row.insert(String::from("five"), json!({ "title": "", "isMarked": false }));
        assert_eq!(
            decode(value),
            Err(MalformedBoardData::InvalidColumnKey {
                row: 4,
                key: String::from("five")
            })
        );

        let mut value = stored_board();
        let row = value["cells"][0].as_object_mut().unwrap();
        row.remove("4");
        row.insert(String::from("01"), json!({ "title": "", "isMarked": false }));
        assert_eq!(
            decode(value),
            Err(MalformedBoardData::DuplicateColumn { row: 0, col: 1 })
        );
    }

    #[test]
    fn altered_free_cell_is_reported() {
        let mut value = stored_board();
        value["cells"][CENTER][CENTER.to_string()] = json!({ "title": "Lunch", "isMarked": true });
        assert_eq!(decode(value), Err(MalformedBoardData::FreeCellAltered));
    }

    #[test]
    fn empty_owner_means_no_owner() {
        let mut value = stored_board();
        value["creater"] = json!("");
        assert_eq!(decode(value).unwrap().owner, None);
    }
}
