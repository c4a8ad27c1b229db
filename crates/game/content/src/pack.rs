//! Content pack data model.
//!
//! A pack is a manifest plus three template arrays. Template ids inside a pack
//! are local (`"goblin"`); [`crate::ContentRegistry`] namespaces them as
//! `"{pack_id}:{template_id}"` when the pack is registered.

use game_core::{
    Entity, EntityId, EntityKind, EntityStats, EquipSlot, Equipment, Inventory, ItemDefinition,
    ItemKind, Position, StatModifier, TileKind, VisionProfile,
};

/// Separator between pack id and template id.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Joins a pack id and a local template id.
pub fn namespaced(pack_id: &str, template_id: &str) -> String {
    format!("{pack_id}{NAMESPACE_SEPARATOR}{template_id}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackManifest {
    pub id: String,
    pub version: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl PackManifest {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            description: String::new(),
        }
    }
}

/// Blueprint for a player or enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityTemplate {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: EntityKind,
    pub max_hp: i32,
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vision: Option<VisionProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory_capacity: Option<usize>,
    /// Item template ids (local or namespaced) equipped at creation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<(EquipSlot, String)>,
}

impl EntityTemplate {
    pub fn new(id: impl Into<String>, kind: EntityKind, max_hp: i32, attack: i32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            max_hp,
            attack,
            defense: None,
            vision: None,
            inventory_capacity: None,
            equipment: Vec::new(),
        }
    }

    pub fn with_vision(mut self, vision: VisionProfile) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn with_equipment(mut self, slot: EquipSlot, item: impl Into<String>) -> Self {
        self.equipment.push((slot, item.into()));
        self
    }

    pub fn stats(&self) -> EntityStats {
        EntityStats {
            max_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
        }
    }

    /// Builds a full-health entity. `template_key` is recorded on the entity.
    ///
    /// Equipment ids are expected to be namespaced already.
    pub fn instantiate(&self, template_key: &str, id: EntityId, position: Position) -> Entity {
        let mut entity =
            Entity::new(id, self.kind, position, self.stats()).with_template(template_key);
        if let Some(vision) = self.vision {
            entity = entity.with_vision(vision);
        }
        if let Some(capacity) = self.inventory_capacity {
            entity = entity.with_inventory(Inventory::with_capacity(capacity));
        }
        if !self.equipment.is_empty() {
            let mut equipment = Equipment::empty();
            for (slot, item) in &self.equipment {
                equipment.slots.insert(*slot, item.as_str().into());
            }
            entity = entity.with_equipment(equipment);
        }
        entity
    }
}

/// Presentation data for a terrain kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileTemplate {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: TileKind,
    pub glyph: char,
}

/// Blueprint for an item; becomes an [`ItemDefinition`] on registration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: ItemKind,
    /// Defaults to stackable for consumables and misc items.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<StatModifier>,
}

impl ItemTemplate {
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            stackable: None,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn to_definition(&self, key: &str) -> ItemDefinition {
        let mut definition = ItemDefinition::new(key, self.name.clone(), self.kind);
        if let Some(stackable) = self.stackable {
            definition = definition.with_stackable(stackable);
        }
        definition.modifiers = self.modifiers.clone();
        definition
    }
}

/// A manifest plus its templates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentPack {
    pub manifest: PackManifest,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entities: Vec<EntityTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiles: Vec<TileTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemTemplate>,
}

impl ContentPack {
    pub fn new(manifest: PackManifest) -> Self {
        Self {
            manifest,
            entities: Vec::new(),
            tiles: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_entity(mut self, template: EntityTemplate) -> Self {
        self.entities.push(template);
        self
    }

    pub fn with_tile(mut self, template: TileTemplate) -> Self {
        self.tiles.push(template);
        self
    }

    pub fn with_item(mut self, template: ItemTemplate) -> Self {
        self.items.push(template);
        self
    }

    pub fn id(&self) -> &str {
        &self.manifest.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantiate_carries_template_and_gear() {
        let template = EntityTemplate::new("knight", EntityKind::Player, 25, 6)
            .with_vision(VisionProfile::circle(5))
            .with_equipment(EquipSlot::Weapon, "base:sword");
        let knight = template.instantiate("base:knight", EntityId(4), Position::new(2, 3));

        assert_eq!(knight.template.as_deref(), Some("base:knight"));
        assert_eq!((knight.hp, knight.max_hp, knight.attack), (25, 25, 6));
        assert_eq!(knight.vision, Some(VisionProfile::circle(5)));
        let gear = knight.equipment.unwrap();
        assert_eq!(gear.get(EquipSlot::Weapon).map(|id| id.as_str()), Some("base:sword"));
    }

    #[test]
    fn item_stackability_defaults_by_kind() {
        let potion = ItemTemplate::new("potion", ItemKind::Consumable).to_definition("base:potion");
        let sword = ItemTemplate::new("sword", ItemKind::Weapon).to_definition("base:sword");
        assert!(potion.stackable);
        assert!(!sword.stackable);
        assert_eq!(sword.id.as_str(), "base:sword");
    }
}
