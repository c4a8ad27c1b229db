//! Repository contracts for the action log and state checkpoints.

use game_core::GameState;

use super::error::Result;
use super::types::ActionLogEntry;

/// Checkpoint storage, keyed by the turn counter of the stored state.
pub trait StateRepository: Send + Sync {
    /// Save `state`, replacing any snapshot already stored for `turn`.
    fn save(&self, turn: u64, state: &GameState) -> Result<()>;

    fn load(&self, turn: u64) -> Result<Option<GameState>>;

    fn exists(&self, turn: u64) -> bool;

    fn delete(&self, turn: u64) -> Result<()>;

    /// Every stored turn, ascending.
    fn list_turns(&self) -> Result<Vec<u64>>;

    /// The most recent snapshot taken at or before `turn`.
    fn latest_at_or_before(&self, turn: u64) -> Result<Option<(u64, GameState)>> {
        let Some(found) = self
            .list_turns()?
            .into_iter()
            .rev()
            .find(|&stored| stored <= turn)
        else {
            return Ok(None);
        };
        Ok(self.load(found)?.map(|state| (found, state)))
    }

    /// Delete every snapshot newer than `turn`, returning how many were removed.
    fn delete_after(&self, turn: u64) -> Result<usize> {
        let mut deleted = 0;
        for stored in self.list_turns()? {
            if stored > turn {
                self.delete(stored)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

/// Append-only log of committed actions.
pub trait ActionRepository: Send + Sync {
    fn append(&self, entry: &ActionLogEntry) -> Result<()>;

    /// Every entry, in commit order.
    fn entries(&self) -> Result<Vec<ActionLogEntry>>;

    /// Drop every entry resolved on `turn` or later, returning how many were removed.
    fn truncate_from(&self, turn: u64) -> Result<usize>;

    /// Entries with `from <= turn < to`, in commit order.
    fn entries_between(&self, from: u64, to: u64) -> Result<Vec<ActionLogEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.turn >= from && entry.turn < to)
            .collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
