use std::sync::{Arc, RwLock};

use crate::repository::{ActionLogEntry, ActionRepository, RepositoryError, Result};

/// In-memory action log. Clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryActionLog {
    entries: Arc<RwLock<Vec<ActionLogEntry>>>,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActionRepository for InMemoryActionLog {
    fn append(&self, entry: &ActionLogEntry) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<ActionLogEntry>> {
        Ok(self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .clone())
    }

    fn truncate_from(&self, turn: u64) -> Result<usize> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let before = entries.len();
        entries.retain(|entry| entry.turn < turn);
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Action, EntityId};

    use super::*;

    #[test]
    fn append_filter_truncate() {
        let log = InMemoryActionLog::new();
        for turn in 1..=5 {
            log.append(&ActionLogEntry::new(turn, Action::wait(EntityId(1))))
                .unwrap();
        }

        let middle: Vec<u64> = log
            .entries_between(2, 4)
            .unwrap()
            .iter()
            .map(|entry| entry.turn)
            .collect();
        assert_eq!(middle, vec![2, 3]);

        assert_eq!(log.truncate_from(4).unwrap(), 2);
        assert_eq!(log.len().unwrap(), 3);
        assert!(log.clone().entries().unwrap().iter().all(|e| e.turn < 4));
    }
}
