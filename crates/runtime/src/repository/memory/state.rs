use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory checkpoint store.
///
/// Clones share the same storage, so a test can keep a clone and inspect
/// what the runtime saved.
#[derive(Clone, Default)]
pub struct InMemoryStateRepo {
    states: Arc<RwLock<BTreeMap<u64, GameState>>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, turn: u64, state: &GameState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(turn, state.clone());
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<GameState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&turn).cloned())
    }

    fn exists(&self, turn: u64) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(&turn))
            .unwrap_or(false)
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(&turn);
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.keys().copied().collect())
    }
}
