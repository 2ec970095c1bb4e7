use std::collections::BTreeMap;

use bingo::{Board, BoardId, Username};
use tracing::debug;

use crate::gateway::{prepare_for_save, sort_newest_first, sort_oldest_first};
use crate::{BoardGateway, PersistenceError};

/// Keeps boards in memory, for local play and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    boards: BTreeMap<BoardId, Board>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl BoardGateway for MemoryGateway {
    fn load_boards_for_owner(&self, owner: &Username) -> Result<Vec<Board>, PersistenceError> {
        let mut boards: Vec<Board> = self
            .boards
            .values()
            .filter(|board| board.owner.as_ref() == Some(owner))
            .cloned()
            .collect();
        sort_oldest_first(&mut boards);
        Ok(boards)
    }

    fn load_board(&self, id: &BoardId) -> Result<Board, PersistenceError> {
        self.boards
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }

    fn load_public_boards(&self, limit: usize) -> Result<Vec<Board>, PersistenceError> {
        let mut boards: Vec<Board> = self
            .boards
            .values()
            .filter(|board| board.is_public)
            .cloned()
            .collect();
        sort_newest_first(&mut boards);
        boards.truncate(limit);
        Ok(boards)
    }

    fn save_board(&mut self, board: &Board) -> Result<Board, PersistenceError> {
        let (id, stored) = prepare_for_save(board);
        debug!(board = %id, "Saving board in memory");
        self.boards.insert(id, stored.clone());
        Ok(stored)
    }
}
