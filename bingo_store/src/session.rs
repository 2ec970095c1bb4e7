use bingo::{Board, BoardId, Username};
use tracing::{debug, warn};

use crate::{BoardGateway, PersistenceError};

/// One user's editing session.
///
/// The session owns the open board and saves it through the gateway after
/// every change that actually did something. If saving fails, the change
/// stays applied locally, the board is flagged as unsaved, and the error is
/// handed back; calling [`Self::save()`] again is up to the caller.
pub struct Session<G> {
    gateway: G,
    user: Username,
    board: Option<Board>,
    unsaved: bool,
}

/// The result of [`Session::toggle_mark()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggle {
    /// Whether the mark flipped at all.
    pub changed: bool,
    /// Whether this mark completed a line.
    pub completed_bingo: bool,
}

impl<G: BoardGateway> Session<G> {
    pub fn new(gateway: G, user: Username) -> Self {
        Self {
            gateway,
            user,
            board: None,
            unsaved: false,
        }
    }

    pub fn user(&self) -> &Username {
        &self.user
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The open board, if any.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// The boards of the session's user.
    pub fn boards(&self) -> Result<Vec<Board>, PersistenceError> {
        self.gateway.load_boards_for_owner(&self.user)
    }

    pub fn public_boards(&self, limit: usize) -> Result<Vec<Board>, PersistenceError> {
        self.gateway.load_public_boards(limit)
    }

    /// Creates and saves an empty board owned by the session's user, and opens it.
    pub fn create_board(&mut self, title: &str, is_public: bool) -> Result<&Board, PersistenceError> {
        let mut board = Board::new(title.trim(), Some(self.user.clone()));
        board.is_public = is_public;
        let saved = self.gateway.save_board(&board)?;
        debug!(board = ?saved.id, user = %self.user, "Created board");
        self.unsaved = false;
        Ok(self.board.insert(saved))
    }

    /// Loads a board and makes it the open one.
    ///
    /// Unsaved changes to the previously open board are dropped.
    pub fn open(&mut self, id: &BoardId) -> Result<&Board, PersistenceError> {
        let board = self.gateway.load_board(id)?;
        if self.unsaved {
            warn!(board = ?self.board.as_ref().and_then(|b| b.id.as_ref()), "Dropping unsaved changes");
        }
        self.unsaved = false;
        Ok(self.board.insert(board))
    }

    /// Closes the open board and returns it.
    pub fn close(&mut self) -> Option<Board> {
        self.unsaved = false;
        self.board.take()
    }

    pub fn edit_cell(&mut self, row: usize, col: usize, title: &str) -> Result<bool, PersistenceError> {
        self.mutate(|board| board.set_cell_title(row, col, title))
    }

    pub fn toggle_mark(&mut self, row: usize, col: usize) -> Result<Toggle, PersistenceError> {
        let changed = self.mutate(|board| board.toggle_mark(row, col))?;
        // Only the lines through this cell can have been completed just now
        let completed_bingo = changed
            && self.board.as_ref().is_some_and(|board| {
                board.cell(row, col).is_some_and(|cell| cell.is_marked)
                    && board.has_bingo_at(row, col)
            });
        Ok(Toggle {
            changed,
            completed_bingo,
        })
    }

    pub fn reset(&mut self) -> Result<bool, PersistenceError> {
        self.mutate(Board::reset)
    }

    pub fn clear(&mut self) -> Result<bool, PersistenceError> {
        self.mutate(Board::clear)
    }

    /// Whether the open board has a completed line.
    pub fn has_bingo(&self) -> bool {
        self.board.as_ref().is_some_and(Board::has_bingo)
    }

    /// Saves the open board.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let board = self.board.as_ref().ok_or(PersistenceError::NoOpenBoard)?;
        match self.gateway.save_board(board) {
            Ok(saved) => {
                debug!(board = ?saved.id, "Saved changes");
                self.board = Some(saved);
                self.unsaved = false;
                Ok(())
            }
            Err(err) => {
                warn!(board = ?board.id, error = %err, "Failed to save board changes");
                Err(err)
            }
        }
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Board) -> bool) -> Result<bool, PersistenceError> {
        let board = self.board.as_mut().ok_or(PersistenceError::NoOpenBoard)?;
        if !f(board) {
            return Ok(false);
        }
        self.unsaved = true;
        self.save()?;
        Ok(true)
    }
}
