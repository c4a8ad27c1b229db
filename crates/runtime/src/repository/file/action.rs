//! JSON-lines action log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::repository::{ActionLogEntry, ActionRepository, RepositoryError, Result};

/// Action log stored as one JSON object per line.
///
/// Together with the session seed this file is enough to replay a session.
pub struct FileActionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileActionLog {
    /// Opens (or prepares to create) the log at `path`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ActionLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line)
                    .map_err(|e| RepositoryError::Json(format!("line {}: {}", index + 1, e)))
            })
            .collect()
    }
}

impl ActionRepository for FileActionLog {
    fn append(&self, entry: &ActionLogEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut line =
            serde_json::to_string(entry).map_err(|e| RepositoryError::Json(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<ActionLogEntry>> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        self.read_all()
    }

    fn truncate_from(&self, turn: u64) -> Result<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let entries = self.read_all()?;
        let before = entries.len();

        let mut content = String::new();
        for entry in entries.iter().filter(|entry| entry.turn < turn) {
            content.push_str(
                &serde_json::to_string(entry).map_err(|e| RepositoryError::Json(e.to_string()))?,
            );
            content.push('\n');
        }
        let kept = content.lines().count();

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            target: "runtime::repository",
            turn,
            removed = before - kept,
            "truncated action log"
        );
        Ok(before - kept)
    }
}
