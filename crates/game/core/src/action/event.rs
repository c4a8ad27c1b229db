use crate::state::{EntityId, Position};

/// Direction of a level transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StairDirection {
    Up,
    Down,
}

/// One observable effect of a resolved turn, in chronological order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GameEvent {
    Moved {
        entity_id: EntityId,
        from: Position,
        to: Position,
    },
    Attacked {
        attacker_id: EntityId,
        defender_id: EntityId,
        damage: i32,
        hp_before: i32,
        hp_after: i32,
    },
    /// Emitted right after the `Attacked` event that dropped hp to zero or below.
    Killed {
        entity_id: EntityId,
        killer_id: EntityId,
        position: Position,
    },
    Wait {
        entity_id: EntityId,
    },
    LevelTransition {
        entity_id: EntityId,
        direction: StairDirection,
        from_level: usize,
        to_level: usize,
        from: Position,
        to: Position,
    },
    Joined {
        entity_id: EntityId,
        position: Position,
    },
}

impl GameEvent {
    /// Entity the event is primarily about.
    pub const fn subject(&self) -> EntityId {
        match *self {
            Self::Moved { entity_id, .. }
            | Self::Killed { entity_id, .. }
            | Self::Wait { entity_id }
            | Self::LevelTransition { entity_id, .. }
            | Self::Joined { entity_id, .. } => entity_id,
            Self::Attacked { defender_id, .. } => defender_id,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::Attacked { .. } => "attacked",
            Self::Killed { .. } => "killed",
            Self::Wait { .. } => "wait",
            Self::LevelTransition { .. } => "level_transition",
            Self::Joined { .. } => "joined",
        }
    }
}
