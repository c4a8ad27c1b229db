use game_core::{EquipSlot, ErrorSeverity, GameError};

use crate::validation::Finding;

/// Setup-time content failures.
///
/// These surface while packs are registered or entities are built from
/// templates, never during turn resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("pack `{0}` is already registered")]
    DuplicatePack(String),

    #[error("pack `{pack}` failed validation with {} error(s)", findings.len())]
    InvalidPack { pack: String, findings: Vec<Finding> },

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    #[error("template `{template}` references unknown item `{item}`")]
    UnknownItem { template: String, item: String },

    #[error("template `{template}` puts item `{item}` in the {slot} slot, which does not accept it")]
    SlotMismatch {
        template: String,
        item: String,
        slot: EquipSlot,
    },

    #[error("template `{0}` is not an enemy")]
    NotAnEnemy(String),

    #[error("an enemy spawner needs at least one template")]
    NoEnemyTemplates,
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicatePack(_) | Self::InvalidPack { .. } => ErrorSeverity::Validation,
            Self::UnknownTemplate(_)
            | Self::UnknownItem { .. }
            | Self::SlotMismatch { .. }
            | Self::NotAnEnemy(_)
            | Self::NoEnemyTemplates => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicatePack(_) => "CONTENT_DUPLICATE_PACK",
            Self::InvalidPack { .. } => "CONTENT_INVALID_PACK",
            Self::UnknownTemplate(_) => "CONTENT_UNKNOWN_TEMPLATE",
            Self::UnknownItem { .. } => "CONTENT_UNKNOWN_ITEM",
            Self::SlotMismatch { .. } => "CONTENT_SLOT_MISMATCH",
            Self::NotAnEnemy(_) => "CONTENT_NOT_AN_ENEMY",
            Self::NoEnemyTemplates => "CONTENT_NO_ENEMY_TEMPLATES",
        }
    }
}
