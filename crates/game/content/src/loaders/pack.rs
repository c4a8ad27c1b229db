//! Content pack loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::pack::ContentPack;

/// Loader for content packs from RON files.
///
/// Parsing does not validate; packs are checked when they are registered.
pub struct PackLoader;

impl PackLoader {
    pub fn load(path: &Path) -> LoadResult<ContentPack> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ContentPack> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse content pack RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EntityKind, ItemKind, StatModifier, TileKind};

    use super::*;

    const BASE: &str = r#"
        (
            manifest: (id: "base", version: "1.0.0", description: "Starter content"),
            entities: [
                (id: "goblin", name: "Goblin", kind: enemy, max_hp: 8, attack: 2),
                (
                    id: "knight",
                    kind: player,
                    max_hp: 30,
                    attack: 5,
                    defense: Some(1),
                    vision: Some((range: 6, blocks_through_walls: true)),
                    equipment: [(weapon, "sword")],
                ),
            ],
            tiles: [(id: "wall", kind: wall, glyph: '#')],
            items: [(id: "sword", name: "Sword", kind: weapon, modifiers: [damage(2)])],
        )
    "#;

    #[test]
    fn parses_a_full_pack() {
        let pack = PackLoader::parse(BASE).unwrap();
        assert_eq!(pack.id(), "base");
        assert_eq!(pack.entities.len(), 2);
        assert_eq!(pack.entities[0].kind, EntityKind::Enemy);
        assert_eq!(pack.entities[1].vision.map(|v| v.range), Some(6));
        assert_eq!(pack.tiles[0].kind, TileKind::Wall);
        assert_eq!(pack.items[0].kind, ItemKind::Weapon);
        assert_eq!(pack.items[0].modifiers, vec![StatModifier::Damage(2)]);
    }

    #[test]
    fn reports_the_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(manifest: )").unwrap();
        let err = PackLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }
}
