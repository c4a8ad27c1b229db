//! Status effects carried by entities.

/// Kinds of status effect content can attach to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusEffectKind {
    Poisoned,
    Stunned,
    Regenerating,
    Shielded,
}

/// A status effect with its remaining duration in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub remaining_turns: u32,
}

impl StatusEffect {
    pub const fn new(kind: StatusEffectKind, remaining_turns: u32) -> Self {
        Self {
            kind,
            remaining_turns,
        }
    }
}
