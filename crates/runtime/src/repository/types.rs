use game_core::Action;
use serde::{Deserialize, Serialize};

/// One committed action, keyed by the turn it was resolved on.
///
/// Replaying entries in order from a snapshot taken at `turn` reproduces
/// every later state exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub turn: u64,
    pub action: Action,
}

impl ActionLogEntry {
    pub fn new(turn: u64, action: Action) -> Self {
        Self { turn, action }
    }
}
