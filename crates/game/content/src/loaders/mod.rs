//! Content loaders for reading game data from files.
//!
//! RON carries content packs and dungeon/campaign definitions, TOML carries the
//! game configuration. [`ContentFactory`] ties them to a data directory layout.

pub mod config;
pub mod definitions;
pub mod factory;
pub mod pack;

pub use config::ConfigLoader;
pub use definitions::{CampaignLoader, DungeonLoader};
pub use factory::ContentFactory;
pub use pack::PackLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
