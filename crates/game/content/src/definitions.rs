//! Authored dungeon and campaign descriptions.
//!
//! These are inputs to session setup and to validation; nothing here reaches
//! the simulation state directly.

use game_core::GeneratorConfig;

/// Parameters for one generated dungeon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonDefinition {
    pub id: String,
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub generator: GeneratorConfig,
    /// Namespaced entity templates enemies are drawn from, in rotation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_templates: Vec<String>,
}

impl DungeonDefinition {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            generator: GeneratorConfig::default(),
            enemy_templates: Vec::new(),
        }
    }

    pub fn with_enemy(mut self, template: impl Into<String>) -> Self {
        self.enemy_templates.push(template.into());
        self
    }
}

/// One stop of a campaign, pointing at a dungeon definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignNode {
    pub id: String,
    pub dungeon: String,
    /// Nodes unlocked after this one is cleared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Vec<String>,
}

impl CampaignNode {
    pub fn new(id: impl Into<String>, dungeon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dungeon: dungeon.into(),
            next: Vec::new(),
        }
    }

    pub fn leads_to(mut self, node: impl Into<String>) -> Self {
        self.next.push(node.into());
        self
    }
}

/// Directed graph of dungeons starting at `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignDefinition {
    pub id: String,
    pub start: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<CampaignNode>,
}

impl CampaignDefinition {
    pub fn node(&self, id: &str) -> Option<&CampaignNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
