//! Event payloads for each topic.

use game_core::{Action, EntityId, GameEvent};
use serde::{Deserialize, Serialize};

/// Participant lifecycle and session-wide changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Joined { player_id: EntityId, turn: u64 },
    Left { player_id: EntityId },
    /// The session was rewound; the next committed turn is `turn`.
    RolledBack { turn: u64 },
}

/// One committed turn, as broadcast to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn: u64,
    pub action: Action,
    pub events: Vec<GameEvent>,
}
