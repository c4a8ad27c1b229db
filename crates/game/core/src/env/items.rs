use std::collections::BTreeMap;
use std::fmt;

/// Namespaced item identifier (`"{pack}:{item}"` once registered).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Read-only lookup of item definitions.
pub trait ItemCatalog: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition>;
}

impl ItemCatalog for BTreeMap<ItemId, ItemDefinition> {
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.get(id)
    }
}

/// Item definition shared by every instance of the item.
///
/// # Stacking
///
/// Stackable items (potions, arrows) merge into one inventory slot with a growing
/// quantity. Non-stackable items (weapons, armour) occupy one slot each.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub stackable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<StatModifier>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            stackable: matches!(kind, ItemKind::Consumable | ItemKind::Misc),
            modifiers: Vec::new(),
        }
    }

    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// Broad item category; decides which equipment slots accept the item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    Weapon,
    Armor,
    Accessory,
    Consumable,
    Misc,
}

/// Closed set of stat contributions an item can make while equipped.
///
/// New bonuses are added as new variants, never as free-form keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatModifier {
    /// Adds to attack.
    Damage(i32),
    /// Adds to defense.
    Defense(i32),
    /// Adds to maximum hit points.
    MaxHp(i32),
}
