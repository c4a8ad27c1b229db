//! Data-driven content: packs, the namespaced registry, validation and loaders.
//!
//! Content is consumed at session setup (entity construction, enemy spawners,
//! item catalogs) and never appears in game state except as the template key
//! recorded on an entity.
//!
//! Loaders use game-core types directly with serde for RON/TOML deserialization.

pub mod definitions;
pub mod error;
pub mod pack;
pub mod registry;
pub mod spawner;
pub mod validation;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use definitions::{CampaignDefinition, CampaignNode, DungeonDefinition};
pub use error::ContentError;
pub use pack::{
    ContentPack, EntityTemplate, ItemTemplate, NAMESPACE_SEPARATOR, PackManifest, TileTemplate,
    namespaced,
};
pub use registry::ContentRegistry;
pub use spawner::TemplateSpawner;
pub use validation::{
    Finding, Severity, has_errors, validate_campaign, validate_dungeon_definition, validate_pack,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    CampaignLoader, ConfigLoader, ContentFactory, DungeonLoader, LoadResult, PackLoader,
};
