//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            vision_range = 5

            [generator]
            max_rooms = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.vision_range, 5);
        assert_eq!(config.generator.max_rooms, 12);
        assert_eq!(config.generator.room_min_size, 6);
        assert_eq!(config.inventory_capacity, GameConfig::DEFAULT_INVENTORY_CAPACITY);
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = ConfigLoader::parse("vision_range = \"far\"").unwrap_err();
        assert!(err.to_string().contains("config TOML"));
    }
}
