//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// Stores each checkpoint as `state_{turn}.bin` (bincode) under one directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// never leaves a half-written checkpoint behind.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn state_path(&self, turn: u64) -> PathBuf {
        self.base_dir.join(format!("state_{}.bin", turn))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, turn: u64, state: &GameState) -> Result<()> {
        let path = self.state_path(turn);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(target: "runtime::repository", turn, path = %path.display(), "saved checkpoint");
        Ok(())
    }

    fn load(&self, turn: u64) -> Result<Option<GameState>> {
        let path = self.state_path(turn);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if state.turn != turn {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds turn {}",
                path.display(),
                state.turn
            )));
        }
        Ok(Some(state))
    }

    fn exists(&self, turn: u64) -> bool {
        self.state_path(turn).exists()
    }

    fn delete(&self, turn: u64) -> Result<()> {
        let path = self.state_path(turn);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", turn, "deleted checkpoint");
        }
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u64>> {
        let mut turns = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(turn) = filename
                    .strip_prefix("state_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(turn) = turn.parse::<u64>()
            {
                turns.push(turn);
            }
        }
        turns.sort_unstable();
        Ok(turns)
    }
}
