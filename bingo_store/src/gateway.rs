use bingo::{Board, BoardId, Username};
use chrono::Utc;

use crate::PersistenceError;

/// How many public boards are listed by default.
pub const PUBLIC_BOARDS_LIMIT: usize = 50;

/// Loads and stores boards.
///
/// Whether the boards live in memory, on disk or in a remote document store is
/// up to the implementation. Nothing is retried here; callers decide what to do
/// with a [`PersistenceError`].
pub trait BoardGateway {
    /// All boards owned by this user, oldest first.
    fn load_boards_for_owner(&self, owner: &Username) -> Result<Vec<Board>, PersistenceError>;

    fn load_board(&self, id: &BoardId) -> Result<Board, PersistenceError>;

    /// Boards shared by any user, newest first, at most `limit` of them.
    fn load_public_boards(&self, limit: usize) -> Result<Vec<Board>, PersistenceError>;

    /// Creates or updates a board, depending on whether it has an id.
    ///
    /// Returns the board as it was stored, which always has an id and timestamps.
    fn save_board(&mut self, board: &Board) -> Result<Board, PersistenceError>;
}

/// Assigns an id to a new board and stamps the save time.
pub(crate) fn prepare_for_save(board: &Board) -> (BoardId, Board) {
    let now = Utc::now();
    let mut stored = board.clone();
    let id = stored.id.get_or_insert_with(BoardId::generate).clone();
    stored.created_at.get_or_insert(now);
    stored.updated_at = Some(now);
    (id, stored)
}

pub(crate) fn sort_oldest_first(boards: &mut [Board]) {
    boards.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
}

pub(crate) fn sort_newest_first(boards: &mut [Board]) {
    boards.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
}
