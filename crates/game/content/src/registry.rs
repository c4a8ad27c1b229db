//! Namespaced template registry.

use std::collections::BTreeMap;

use game_core::{
    Entity, EntityId, EntityKind, ItemCatalog, ItemDefinition, ItemId, Position, TileKind,
};

use crate::error::ContentError;
use crate::pack::{
    ContentPack, EntityTemplate, NAMESPACE_SEPARATOR, PackManifest, TileTemplate, namespaced,
};
use crate::spawner::TemplateSpawner;
use crate::validation::{Finding, validate_pack};

/// Every registered template, keyed by `"{pack_id}:{template_id}"`.
///
/// Registration is all-or-nothing per pack; lookups never see a half-registered
/// pack.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    packs: BTreeMap<String, PackManifest>,
    entities: BTreeMap<String, EntityTemplate>,
    tiles: BTreeMap<String, TileTemplate>,
    items: BTreeMap<ItemId, ItemDefinition>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers `pack`, returning the validation warnings.
    ///
    /// # Errors
    ///
    /// - [`ContentError::InvalidPack`] if validation reports any error
    /// - [`ContentError::DuplicatePack`] if the pack id is taken
    /// - [`ContentError::UnknownItem`] if equipment names an item that is
    ///   neither in this pack nor already registered
    /// - [`ContentError::SlotMismatch`] if an equipped item does not fit its slot
    pub fn register_pack(&mut self, pack: ContentPack) -> Result<Vec<Finding>, ContentError> {
        let pack_id = pack.id().to_owned();
        let (errors, warnings): (Vec<Finding>, Vec<Finding>) =
            validate_pack(&pack).into_iter().partition(Finding::is_error);
        if !errors.is_empty() {
            tracing::warn!(
                target: "content::registry",
                pack = %pack_id,
                errors = errors.len(),
                "rejecting content pack"
            );
            return Err(ContentError::InvalidPack {
                pack: pack_id,
                findings: errors,
            });
        }
        if self.packs.contains_key(&pack_id) {
            return Err(ContentError::DuplicatePack(pack_id));
        }

        let items: Vec<ItemDefinition> = pack
            .items
            .iter()
            .map(|item| item.to_definition(&namespaced(&pack_id, &item.id)))
            .collect();

        let mut entities = Vec::with_capacity(pack.entities.len());
        for template in &pack.entities {
            let key = namespaced(&pack_id, &template.id);
            let mut resolved = template.clone();
            for (slot, item) in &mut resolved.equipment {
                let qualified = qualify(&pack_id, item);
                let kind = self
                    .items
                    .get(&ItemId::new(qualified.as_str()))
                    .or_else(|| items.iter().find(|def| def.id.as_str() == qualified))
                    .map(|def| def.kind);
                let Some(kind) = kind else {
                    return Err(ContentError::UnknownItem {
                        template: key,
                        item: qualified,
                    });
                };
                if !slot.accepts(kind) {
                    return Err(ContentError::SlotMismatch {
                        template: key,
                        item: qualified,
                        slot: *slot,
                    });
                }
                *item = qualified;
            }
            entities.push((key, resolved));
        }

        for warning in &warnings {
            tracing::warn!(target: "content::registry", pack = %pack_id, "{warning}");
        }

        self.items
            .extend(items.into_iter().map(|item| (item.id.clone(), item)));
        self.entities.extend(entities);
        self.tiles.extend(
            pack.tiles
                .iter()
                .map(|tile| (namespaced(&pack_id, &tile.id), tile.clone())),
        );
        tracing::info!(
            target: "content::registry",
            pack = %pack_id,
            version = %pack.manifest.version,
            entities = pack.entities.len(),
            tiles = pack.tiles.len(),
            items = pack.items.len(),
            "registered content pack"
        );
        self.packs.insert(pack_id, pack.manifest);
        Ok(warnings)
    }

    pub fn packs(&self) -> impl Iterator<Item = &PackManifest> {
        self.packs.values()
    }

    pub fn entity_template(&self, key: &str) -> Option<&EntityTemplate> {
        self.entities.get(key)
    }

    pub fn entity_templates(&self) -> impl Iterator<Item = (&str, &EntityTemplate)> {
        self.entities.iter().map(|(key, template)| (key.as_str(), template))
    }

    /// Namespaced keys of every enemy template, in key order.
    pub fn enemy_keys(&self) -> Vec<String> {
        self.entities
            .iter()
            .filter(|(_, template)| template.kind == EntityKind::Enemy)
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn tile_template(&self, key: &str) -> Option<&TileTemplate> {
        self.tiles.get(key)
    }

    /// Glyph of the first registered tile template for `kind`.
    pub fn glyph(&self, kind: TileKind) -> Option<char> {
        self.tiles
            .values()
            .find(|tile| tile.kind == kind)
            .map(|tile| tile.glyph)
    }

    /// Builds an entity from a registered template.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownTemplate`] if `key` is not registered.
    pub fn create_entity(
        &self,
        key: &str,
        id: EntityId,
        position: Position,
    ) -> Result<Entity, ContentError> {
        let template = self
            .entity_template(key)
            .ok_or_else(|| ContentError::UnknownTemplate(key.to_owned()))?;
        Ok(template.instantiate(key, id, position))
    }

    /// Builds a spawner that cycles through the given enemy templates.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, an unknown key, or a key naming a non-enemy
    /// template.
    pub fn spawner<S: AsRef<str>>(&self, keys: &[S]) -> Result<TemplateSpawner, ContentError> {
        if keys.is_empty() {
            return Err(ContentError::NoEnemyTemplates);
        }
        let mut templates = Vec::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            let template = self
                .entity_template(key)
                .ok_or_else(|| ContentError::UnknownTemplate(key.to_owned()))?;
            if template.kind != EntityKind::Enemy {
                return Err(ContentError::NotAnEnemy(key.to_owned()));
            }
            templates.push((key.to_owned(), template.clone()));
        }
        Ok(TemplateSpawner::new(templates))
    }
}

impl ItemCatalog for ContentRegistry {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }
}

fn qualify(pack_id: &str, id: &str) -> String {
    if id.contains(NAMESPACE_SEPARATOR) {
        id.to_owned()
    } else {
        namespaced(pack_id, id)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{
        EnemySpawner, EquipSlot, GameError, IdAllocator, ItemKind, StatModifier, effective_stats,
    };

    use super::*;
    use crate::pack::ItemTemplate;

    fn base_pack() -> ContentPack {
        ContentPack::new(PackManifest::new("base", "1.0.0"))
            .with_item(
                ItemTemplate::new("sword", ItemKind::Weapon).with_modifier(StatModifier::Damage(2)),
            )
            .with_entity(
                EntityTemplate::new("knight", EntityKind::Player, 30, 5)
                    .with_equipment(EquipSlot::Weapon, "sword"),
            )
            .with_entity(EntityTemplate::new("goblin", EntityKind::Enemy, 8, 2))
            .with_entity(EntityTemplate::new("orc", EntityKind::Enemy, 15, 4))
    }

    #[test]
    fn templates_are_namespaced() {
        let mut registry = ContentRegistry::new();
        registry.register_pack(base_pack()).unwrap();

        assert!(registry.entity_template("base:goblin").is_some());
        assert!(registry.entity_template("goblin").is_none());
        assert_eq!(registry.enemy_keys(), vec!["base:goblin", "base:orc"]);
        assert!(registry.item(&ItemId::from("base:sword")).is_some());
    }

    #[test]
    fn equipment_is_qualified_and_counts_toward_stats() {
        let mut registry = ContentRegistry::new();
        registry.register_pack(base_pack()).unwrap();

        let knight = registry
            .create_entity("base:knight", EntityId(1), Position::new(1, 1))
            .unwrap();
        assert_eq!(knight.template.as_deref(), Some("base:knight"));
        assert_eq!(effective_stats(&knight, &registry).attack, 7);
    }

    #[test]
    fn duplicate_and_invalid_packs_are_refused() {
        let mut registry = ContentRegistry::new();
        registry.register_pack(base_pack()).unwrap();
        assert_eq!(
            registry.register_pack(base_pack()),
            Err(ContentError::DuplicatePack("base".into()))
        );

        let mut broken = base_pack();
        broken.manifest.id = "other".into();
        broken.entities[1].max_hp = -1;
        let err = registry.register_pack(broken).unwrap_err();
        assert_eq!(err.error_code(), "CONTENT_INVALID_PACK");
        assert_eq!(registry.packs().count(), 1, "nothing from the broken pack is kept");
        assert!(registry.entity_template("other:goblin").is_none());
    }

    #[test]
    fn cross_pack_equipment_must_exist() {
        let mut registry = ContentRegistry::new();
        let addon = ContentPack::new(PackManifest::new("addon", "0.1")).with_entity(
            EntityTemplate::new("paladin", EntityKind::Player, 40, 6)
                .with_equipment(EquipSlot::Weapon, "base:sword"),
        );
        assert!(matches!(
            registry.register_pack(addon.clone()),
            Err(ContentError::UnknownItem { .. })
        ));

        registry.register_pack(base_pack()).unwrap();
        registry.register_pack(addon).unwrap();
        assert!(registry.entity_template("addon:paladin").is_some());
    }

    #[test]
    fn cross_pack_equipment_must_fit_its_slot() {
        let mut registry = ContentRegistry::new();
        let armory = ContentPack::new(PackManifest::new("armory", "1.0.0"))
            .with_item(
                ItemTemplate::new("helm", ItemKind::Armor).with_modifier(StatModifier::Defense(1)),
            );
        registry.register_pack(armory).unwrap();

        let misfit = ContentPack::new(PackManifest::new("guards", "0.1")).with_entity(
            EntityTemplate::new("sentry", EntityKind::Enemy, 12, 3)
                .with_equipment(EquipSlot::Weapon, "armory:helm"),
        );
        assert_eq!(
            registry.register_pack(misfit.clone()),
            Err(ContentError::SlotMismatch {
                template: "guards:sentry".into(),
                item: "armory:helm".into(),
                slot: EquipSlot::Weapon,
            })
        );
        assert!(registry.entity_template("guards:sentry").is_none());

        let mut fitted = misfit;
        fitted.entities[0].equipment[0].0 = EquipSlot::Head;
        registry.register_pack(fitted).unwrap();
        assert!(registry.entity_template("guards:sentry").is_some());
    }

    #[test]
    fn unknown_template_is_a_setup_error() {
        let registry = ContentRegistry::new();
        let err = registry
            .create_entity("base:dragon", EntityId(1), Position::new(0, 0))
            .unwrap_err();
        assert_eq!(err, ContentError::UnknownTemplate("base:dragon".into()));
        assert!(err.severity().is_internal());
    }

    #[test]
    fn spawner_rejects_players_and_unknowns() {
        let mut registry = ContentRegistry::new();
        registry.register_pack(base_pack()).unwrap();

        assert_eq!(
            registry.spawner(&["base:knight"]).unwrap_err(),
            ContentError::NotAnEnemy("base:knight".into())
        );
        assert_eq!(
            registry.spawner::<&str>(&[]).unwrap_err(),
            ContentError::NoEnemyTemplates
        );
        let spawner = registry.spawner(registry.enemy_keys().as_slice()).unwrap();
        let mut ids = IdAllocator::default();
        let spawned = spawner.spawn(0, &[Position::new(2, 2)], &mut ids);
        assert_eq!(spawned[0].template.as_deref(), Some("base:goblin"));
    }
}
