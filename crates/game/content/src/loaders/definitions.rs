//! Dungeon and campaign definition loaders.

use std::path::Path;

use crate::definitions::{CampaignDefinition, DungeonDefinition};
use crate::loaders::{LoadResult, read_file};

/// Loader for dungeon definitions from RON files.
pub struct DungeonLoader;

impl DungeonLoader {
    pub fn load(path: &Path) -> LoadResult<DungeonDefinition> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dungeon RON {}: {}", path.display(), e))
    }
}

/// Loader for campaign graphs from RON files.
pub struct CampaignLoader;

impl CampaignLoader {
    pub fn load(path: &Path) -> LoadResult<CampaignDefinition> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse campaign RON {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dungeon_defaults_generator_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypt.ron");
        std::fs::write(
            &path,
            r#"(id: "crypt", width: 60, height: 40, enemy_templates: ["base:goblin"])"#,
        )
        .unwrap();

        let dungeon = DungeonLoader::load(&path).unwrap();
        assert_eq!((dungeon.width, dungeon.height), (60, 40));
        assert_eq!(dungeon.generator, game_core::GeneratorConfig::default());
        assert_eq!(dungeon.enemy_templates, vec!["base:goblin"]);
    }

    #[test]
    fn campaign_nodes_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.ron");
        std::fs::write(
            &path,
            r#"(id: "main", start: "a", nodes: [(id: "a", dungeon: "crypt", next: ["b"]), (id: "b", dungeon: "crypt")])"#,
        )
        .unwrap();

        let campaign = CampaignLoader::load(&path).unwrap();
        assert_eq!(campaign.nodes.len(), 2);
        assert_eq!(campaign.node("a").map(|n| n.next.clone()), Some(vec!["b".to_owned()]));
    }
}
