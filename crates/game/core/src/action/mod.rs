//! Player intents and the observable events their resolution produces.
//!
//! An [`Action`] is what a participant submits; a [`GameEvent`] is what happened.
//! Events carry enough before/after data that a client can animate or log a
//! turn without re-deriving any rule.
mod event;

pub use event::{GameEvent, StairDirection};

use crate::state::EntityId;

/// A single intent submitted for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Action {
    /// Step (or attack) one cell; `dx`, `dy` ∈ {-1, 0, 1}, not both zero.
    Move { actor_id: EntityId, dx: i32, dy: i32 },
    Wait { actor_id: EntityId },
    /// Adds a player with this id to the active level.
    Join { actor_id: EntityId },
    /// Uses the stairs the actor is standing on.
    TakeStairs { actor_id: EntityId },
}

impl Action {
    pub const fn move_by(actor_id: EntityId, dx: i32, dy: i32) -> Self {
        Self::Move { actor_id, dx, dy }
    }

    pub const fn wait(actor_id: EntityId) -> Self {
        Self::Wait { actor_id }
    }

    pub const fn join(actor_id: EntityId) -> Self {
        Self::Join { actor_id }
    }

    pub const fn take_stairs(actor_id: EntityId) -> Self {
        Self::TakeStairs { actor_id }
    }

    pub const fn actor_id(&self) -> EntityId {
        match *self {
            Self::Move { actor_id, .. }
            | Self::Wait { actor_id }
            | Self::Join { actor_id }
            | Self::TakeStairs { actor_id } => actor_id,
        }
    }

    /// Snake-case name of the variant, as used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Wait { .. } => "wait",
            Self::Join { .. } => "join",
            Self::TakeStairs { .. } => "take_stairs",
        }
    }
}

/// True for a one-cell step in any of the eight directions.
pub const fn is_step(dx: i32, dy: i32) -> bool {
    dx >= -1 && dx <= 1 && dy >= -1 && dy <= 1 && !(dx == 0 && dy == 0)
}
