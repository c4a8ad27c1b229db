//! JSON session protocol between the authority and its participants.
//!
//! ```text
//! server -> client   {"type":"welcome","player_id":3,"initial_state":{..}}
//!                    {"type":"delta","turn":7,"events":[..],"action":{..}}
//!                    {"type":"error","message":"unknown participant #9"}
//! client -> server   {"type":"action","player_id":3,"action":{"type":"move",..}}
//! ```
use game_core::{Action, EntityId, GameEvent, GameState};
use serde::{Deserialize, Serialize};

/// Message sent by the authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once to a newly connected participant.
    Welcome {
        player_id: EntityId,
        initial_state: Box<GameState>,
    },
    /// One committed turn. `turn` is the counter the action was resolved on.
    Delta {
        turn: u64,
        events: Vec<GameEvent>,
        action: Action,
    },
    /// A rejected request. In-game no-ops are deltas, never errors.
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Message sent by a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Action { player_id: EntityId, action: Action },
}

impl ClientMessage {
    pub fn action(player_id: EntityId, action: Action) -> Self {
        Self::Action { player_id, action }
    }

    pub fn player_id(&self) -> EntityId {
        match self {
            Self::Action { player_id, .. } => *player_id,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
