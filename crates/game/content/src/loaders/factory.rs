//! Content factory for building a registry from data files.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::definitions::{CampaignDefinition, DungeonDefinition};
use crate::loaders::{CampaignLoader, ConfigLoader, DungeonLoader, LoadResult, PackLoader};
use crate::pack::ContentPack;
use crate::registry::ContentRegistry;
use crate::validation::{Finding, validate_campaign, validate_dungeon_definition};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── campaign.ron
/// ├── packs/
/// │   ├── base.ron
/// │   └── undead.ron
/// └── dungeons/
///     ├── crypt.ron
///     └── caves.ron
/// ```
///
/// Every file is optional; missing files yield defaults or empty lists.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults if it is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(
                target: "content::factory",
                path = %path.display(),
                "no config file, using defaults"
            );
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every `packs/*.ron`, in file-name order.
    pub fn load_packs(&self) -> LoadResult<Vec<ContentPack>> {
        ron_files(&self.data_dir.join("packs"))?
            .iter()
            .map(|path| PackLoader::load(path))
            .collect()
    }

    /// Load and register every pack.
    ///
    /// Packs are registered in file-name order, so a pack may reference items
    /// from any pack whose file sorts before it.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let mut registry = ContentRegistry::new();
        for pack in self.load_packs()? {
            let id = pack.id().to_owned();
            registry
                .register_pack(pack)
                .map_err(|e| anyhow::anyhow!("Failed to register pack {}: {}", id, e))?;
        }
        Ok(registry)
    }

    /// Load `dungeons/{name}.ron`.
    pub fn load_dungeon(&self, name: &str) -> LoadResult<DungeonDefinition> {
        let path = self.data_dir.join("dungeons").join(format!("{}.ron", name));
        DungeonLoader::load(&path)
    }

    pub fn load_dungeons(&self) -> LoadResult<Vec<DungeonDefinition>> {
        ron_files(&self.data_dir.join("dungeons"))?
            .iter()
            .map(|path| DungeonLoader::load(path))
            .collect()
    }

    /// Load `campaign.ron` if present.
    pub fn load_campaign(&self) -> LoadResult<Option<CampaignDefinition>> {
        let path = self.data_dir.join("campaign.ron");
        if !path.exists() {
            return Ok(None);
        }
        CampaignLoader::load(&path).map(Some)
    }

    /// Validates every dungeon definition and the campaign against `registry`.
    ///
    /// Finding fields are prefixed with the definition they belong to.
    pub fn validate(&self, registry: &ContentRegistry) -> LoadResult<Vec<Finding>> {
        let dungeons = self.load_dungeons()?;
        let mut findings = Vec::new();
        for dungeon in &dungeons {
            findings.extend(
                validate_dungeon_definition(dungeon, registry)
                    .into_iter()
                    .map(|finding| prefixed(&format!("dungeons.{}", dungeon.id), finding)),
            );
        }
        if let Some(campaign) = self.load_campaign()? {
            findings.extend(
                validate_campaign(&campaign, &dungeons)
                    .into_iter()
                    .map(|finding| prefixed("campaign", finding)),
            );
        }
        Ok(findings)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn prefixed(prefix: &str, mut finding: Finding) -> Finding {
    finding.field = format!("{prefix}.{}", finding.field);
    finding
}

fn ron_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_registry().unwrap().packs().count(), 0);
        assert!(factory.load_campaign().unwrap().is_none());
    }

    #[test]
    fn loads_packs_in_order_and_validates_definitions() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "packs/a_base.ron",
            r#"(manifest: (id: "base", version: "1"), items: [(id: "club", kind: weapon)],
                entities: [(id: "rat", kind: enemy, max_hp: 3, attack: 1)])"#,
        );
        write(
            dir.path(),
            "packs/b_more.ron",
            r#"(manifest: (id: "more", version: "1"),
                entities: [(id: "brute", kind: enemy, max_hp: 9, attack: 3, equipment: [(weapon, "base:club")])])"#,
        );
        write(
            dir.path(),
            "dungeons/crypt.ron",
            r#"(id: "crypt", width: 50, height: 50, enemy_templates: ["more:brute", "more:ghost"])"#,
        );
        write(
            dir.path(),
            "campaign.ron",
            r#"(id: "main", start: "one", nodes: [(id: "one", dungeon: "crypt")])"#,
        );

        let factory = ContentFactory::new(dir.path());
        let registry = factory.load_registry().unwrap();
        assert!(registry.entity_template("more:brute").is_some());

        let findings = factory.validate(&registry).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field, "dungeons.crypt.enemy_templates[1]");
    }

    #[test]
    fn bundled_data_is_valid() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../../data"));
        let config = factory.load_config().unwrap();
        assert_eq!(config.generator.levels, 3);

        let registry = factory.load_registry().unwrap();
        assert_eq!(registry.packs().count(), 2);
        assert!(registry.entity_template("undead:wight").is_some());

        let findings = factory.validate(&registry).unwrap();
        assert!(findings.is_empty(), "{findings:?}");
        assert_eq!(factory.load_dungeons().unwrap().len(), 2);
    }

    #[test]
    fn invalid_pack_fails_the_registry() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "packs/bad.ron",
            r#"(manifest: (id: "bad", version: ""), entities: [(id: "x", kind: enemy, max_hp: 1, attack: 1)])"#,
        );
        let err = ContentFactory::new(dir.path()).load_registry().unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
