use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use lazy_static::lazy_static;

use super::orchestrator::Orchestrator;

/// Live boards keyed by id, so a reloaded page can reattach to its board.
pub struct BoardManager {
    boards: HashMap<String, Arc<Orchestrator>>,
}

impl BoardManager {
    pub fn new() -> Self {
        Self {
            boards: HashMap::new(),
        }
    }

    pub fn get(&self, board_id: &str) -> Option<Arc<Orchestrator>> {
        self.boards.get(board_id).cloned()
    }

    pub fn add(&mut self, board: Orchestrator) -> Arc<Orchestrator> {
        let board = Arc::new(board);
        self.boards.insert(board.board_id().to_string(), Arc::clone(&board));
        board
    }

    /// Returns the board registered under `board_id`, building it with
    /// `create` when missing.
    pub fn get_or_create<F>(&mut self, board_id: &str, create: F) -> Result<Arc<Orchestrator>>
    where
        F: FnOnce(String) -> Result<Orchestrator>,
    {
        if let Some(existing) = self.get(board_id) {
            return Ok(existing);
        }
        let board = create(board_id.to_string())?;
        Ok(self.add(board))
    }

    pub fn remove(&mut self, board_id: &str) -> Option<Arc<Orchestrator>> {
        self.boards.remove(board_id)
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.boards.keys().cloned().collect()
    }
}

impl Default for BoardManager {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    pub static ref BOARD_MANAGER: StdMutex<BoardManager> = StdMutex::new(BoardManager::new());
}
