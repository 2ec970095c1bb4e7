use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use bingo::{Board, BoardDocument, BoardId, Username};
use tracing::{debug, trace, warn};

use crate::gateway::{prepare_for_save, sort_newest_first, sort_oldest_first};
use crate::{BoardGateway, PersistenceError};

/// Stores every board as a JSON document named `<id>.json` in one directory.
///
/// The documents have the same shape as in the remote document store, see
/// [`BoardDocument`].
#[derive(Clone, Debug)]
pub struct JsonDirGateway {
    directory: PathBuf,
}

impl JsonDirGateway {
    /// Uses the given directory, creating it if needed.
    pub fn open(directory: PathBuf) -> Result<Self, PersistenceError> {
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: &BoardId) -> Result<PathBuf, PersistenceError> {
        if !id.is_plain() {
            return Err(PersistenceError::InvalidId(id.clone()));
        }
        Ok(self.directory.join(format!("{}.json", id)))
    }

    fn read_board(&self, id: &BoardId) -> Result<Board, PersistenceError> {
        let path = self.path_for(id)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(id.clone()))
            }
            Err(err) => return Err(err.into()),
        };
        trace!(board = %id, document = %contents, "Read board document");
        let doc: BoardDocument =
            serde_json::from_str(&contents).map_err(|source| PersistenceError::Decode {
                id: id.clone(),
                source,
            })?;
        let mut board = Board::try_from(doc).map_err(|source| PersistenceError::Malformed {
            id: id.clone(),
            source,
        })?;
        board.id = Some(id.clone());
        Ok(board)
    }

    /// Reads every board in the directory.
    ///
    /// Documents that cannot be turned into a board are logged and left out,
    /// so that one bad file does not hide all the others.
    fn read_all(&self) -> Result<Vec<Board>, PersistenceError> {
        let mut boards = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(OsStr::to_str).map(BoardId::from) else {
                continue;
            };
            if !id.is_plain() {
                warn!(path = %path.display(), "Skipping file that is not named after a board id");
                continue;
            }
            match self.read_board(&id) {
                Ok(board) => boards.push(board),
                Err(err @ (PersistenceError::Decode { .. } | PersistenceError::Malformed { .. })) => {
                    let cause = std::error::Error::source(&err);
                    warn!(board = %id, error = %err, ?cause, "Skipping unreadable board");
                }
                // Deleted since the directory was listed
                Err(PersistenceError::NotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        debug!(count = boards.len(), directory = %self.directory.display(), "Read boards");
        Ok(boards)
    }
}

fn write_document(path: &Path, board: &Board) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &BoardDocument::from(board))
        .map_err(PersistenceError::Encode)?;
    writer.flush()?;
    Ok(())
}

impl BoardGateway for JsonDirGateway {
    fn load_boards_for_owner(&self, owner: &Username) -> Result<Vec<Board>, PersistenceError> {
        let mut boards = self.read_all()?;
        boards.retain(|board| board.owner.as_ref() == Some(owner));
        sort_oldest_first(&mut boards);
        Ok(boards)
    }

    fn load_board(&self, id: &BoardId) -> Result<Board, PersistenceError> {
        self.read_board(id)
    }

    fn load_public_boards(&self, limit: usize) -> Result<Vec<Board>, PersistenceError> {
        let mut boards = self.read_all()?;
        boards.retain(|board| board.is_public);
        sort_newest_first(&mut boards);
        boards.truncate(limit);
        Ok(boards)
    }

    fn save_board(&mut self, board: &Board) -> Result<Board, PersistenceError> {
        let (id, stored) = prepare_for_save(board);
        let path = self.path_for(&id)?;
        // Write next to the target first, so a failed write never leaves half a document
        let tmp_path = path.with_extension("json.tmp");
        let written = write_document(&tmp_path, &stored)
            .and_then(|()| fs::rename(&tmp_path, &path).map_err(PersistenceError::from));
        if let Err(err) = written {
            if let Err(remove_err) = fs::remove_file(&tmp_path) {
                if remove_err.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp_path.display(), error = %remove_err, "Could not remove temporary file");
                }
            }
            return Err(err);
        }
        debug!(board = %id, path = %path.display(), "Saved board");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use bingo::MalformedBoardData;

    use super::*;
    use crate::PUBLIC_BOARDS_LIMIT;

    fn user(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    #[test]
    fn saved_board_can_be_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = JsonDirGateway::open(dir.path().to_path_buf()).unwrap();

        let mut board = Board::new("Concert", Some(user("carol")));
        board.set_cell_title(4, 0, "Encore");
        board.toggle_mark(4, 0);
        let saved = gateway.save_board(&board).unwrap();
        let id = saved.id.clone().unwrap();

        assert!(dir.path().join(format!("{}.json", id)).is_file());
        assert_eq!(gateway.load_board(&id).unwrap(), saved);
        assert_eq!(gateway.load_boards_for_owner(&user("carol")).unwrap(), vec![saved]);
        assert!(gateway.load_boards_for_owner(&user("dave")).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let gateway = JsonDirGateway::open(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert!(gateway.load_public_boards(10).unwrap().is_empty());
    }

    #[test]
    fn corrupt_documents_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonDirGateway::open(dir.path().to_path_buf()).unwrap();

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(
            gateway.load_board(&BoardId::from("broken")),
            Err(PersistenceError::Decode { .. })
        ));

        fs::write(dir.path().join("short.json"), r#"{ "title": "x", "cells": [] }"#).unwrap();
        match gateway.load_board(&BoardId::from("short")) {
            Err(PersistenceError::Malformed { id, source }) => {
                assert_eq!(id.as_str(), "short");
                assert_eq!(source, MalformedBoardData::WrongRowCount { found: 0 });
            }
            other => panic!("Expected a malformed board, got {:?}", other),
        }
    }

    #[test]
    fn ids_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = JsonDirGateway::open(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            gateway.load_board(&BoardId::from("../secret")),
            Err(PersistenceError::InvalidId(_))
        ));
        assert!(matches!(
            gateway.load_board(&BoardId::from("nothing")),
            Err(PersistenceError::NotFound(_))
        ));
    }

    #[test]
    fn other_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = JsonDirGateway::open(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        let mut board = Board::new("Shared", Some(user("erin")));
        board.is_public = true;
        gateway.save_board(&board).unwrap();
        assert_eq!(gateway.load_public_boards(50).unwrap().len(), 1);
    }

    #[test]
    fn unreadable_documents_do_not_hide_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = JsonDirGateway::open(dir.path().to_path_buf()).unwrap();
        let mut board = Board::new("Lunch", Some(user("alice")));
        board.is_public = true;
        let saved = gateway.save_board(&board).unwrap();

        fs::write(dir.path().join("bobsboard.json"), r#"{ "title": "x", "cells": [] }"#).unwrap();
        fs::write(dir.path().join("garbage.json"), "[1, 2").unwrap();
        fs::write(dir.path().join("my notes.json"), "{}").unwrap();

        assert_eq!(gateway.load_boards_for_owner(&user("alice")).unwrap(), vec![saved.clone()]);
        assert_eq!(gateway.load_public_boards(PUBLIC_BOARDS_LIMIT).unwrap(), vec![saved]);
        assert!(matches!(
            gateway.load_board(&BoardId::from("bobsboard")),
            Err(PersistenceError::Malformed { .. })
        ));
    }

    #[test]
    fn failed_save_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut gateway = JsonDirGateway::open(dir.path().to_path_buf()).unwrap();
        // A directory in the way makes the final rename fail
        let blocker = dir.path().join("blocked.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "").unwrap();

        let mut board = Board::new("Blocked", Some(user("alice")));
        board.id = Some(BoardId::from("blocked"));
        assert!(matches!(gateway.save_board(&board), Err(PersistenceError::Io(_))));
        assert!(!dir.path().join("blocked.json.tmp").exists());
        assert!(blocker.is_dir());
    }
}
