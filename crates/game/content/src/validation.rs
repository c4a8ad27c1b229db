//! Static checks over authored content.
//!
//! Validators never fail; they collect every problem they find. Any
//! [`Severity::Error`] finding blocks use of the content, warnings are advisory.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use game_core::{EntityKind, GeneratorConfig, ItemKind};

use crate::definitions::{CampaignDefinition, DungeonDefinition};
use crate::pack::{ContentPack, NAMESPACE_SEPARATOR};
use crate::registry::ContentRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Warning,
    Error,
}

/// One validation result, addressed by a dotted field path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}: {}", self.field, self.message)
    }
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}

fn check_local_id(
    findings: &mut Vec<Finding>,
    field: String,
    id: &str,
    seen: &mut BTreeSet<String>,
) {
    if id.is_empty() {
        findings.push(Finding::error(field, "id must not be empty"));
    } else if id.contains(NAMESPACE_SEPARATOR) {
        findings.push(Finding::error(
            field,
            format!("id `{id}` must not contain `{NAMESPACE_SEPARATOR}`"),
        ));
    } else if !seen.insert(id.to_owned()) {
        findings.push(Finding::error(field, format!("duplicate id `{id}`")));
    }
}

/// Checks a pack in isolation.
///
/// Equipment references to local item ids are resolved against the pack's own
/// items; namespaced references are left to the registry.
pub fn validate_pack(pack: &ContentPack) -> Vec<Finding> {
    let mut findings = Vec::new();
    let manifest = &pack.manifest;
    if manifest.id.is_empty() {
        findings.push(Finding::error("manifest.id", "pack id must not be empty"));
    } else if manifest.id.contains(NAMESPACE_SEPARATOR) {
        findings.push(Finding::error(
            "manifest.id",
            format!("pack id must not contain `{NAMESPACE_SEPARATOR}`"),
        ));
    }
    if manifest.version.trim().is_empty() {
        findings.push(Finding::error("manifest.version", "version must not be empty"));
    }
    if pack.entities.is_empty() && pack.tiles.is_empty() && pack.items.is_empty() {
        findings.push(Finding::warning("manifest", "pack defines no templates"));
    }

    let mut item_ids = BTreeSet::new();
    let mut item_kinds: BTreeMap<&str, ItemKind> = BTreeMap::new();
    for (index, item) in pack.items.iter().enumerate() {
        check_local_id(&mut findings, format!("items[{index}].id"), &item.id, &mut item_ids);
        item_kinds.entry(item.id.as_str()).or_insert(item.kind);
        if item.stackable == Some(true) && matches!(item.kind, ItemKind::Weapon | ItemKind::Armor) {
            findings.push(Finding::warning(
                format!("items[{index}].stackable"),
                "equippable items are usually not stackable",
            ));
        }
    }

    let mut entity_ids = BTreeSet::new();
    for (index, entity) in pack.entities.iter().enumerate() {
        let field = format!("entities[{index}].id");
        check_local_id(&mut findings, field, &entity.id, &mut entity_ids);
        if entity.max_hp <= 0 {
            findings.push(Finding::error(
                format!("entities[{index}].max_hp"),
                "max_hp must be positive",
            ));
        }
        if entity.attack < 0 {
            findings.push(Finding::warning(
                format!("entities[{index}].attack"),
                "negative attack deals no damage",
            ));
        }
        if entity.vision.is_some_and(|vision| vision.range == 0) {
            findings.push(Finding::warning(
                format!("entities[{index}].vision.range"),
                "entity sees only its own tile",
            ));
        }
        for (slot_index, (slot, item)) in entity.equipment.iter().enumerate() {
            if item.contains(NAMESPACE_SEPARATOR) {
                continue;
            }
            let field = format!("entities[{index}].equipment[{slot_index}]");
            match item_kinds.get(item.as_str()) {
                None => findings.push(Finding::error(field, format!("unknown item `{item}`"))),
                Some(kind) if !slot.accepts(*kind) => findings.push(Finding::error(
                    field,
                    format!("item `{item}` does not fit the {slot} slot"),
                )),
                Some(_) => {}
            }
        }
    }

    let mut tile_ids = BTreeSet::new();
    for (index, tile) in pack.tiles.iter().enumerate() {
        check_local_id(&mut findings, format!("tiles[{index}].id"), &tile.id, &mut tile_ids);
        if tile.glyph.is_whitespace() {
            findings.push(Finding::warning(
                format!("tiles[{index}].glyph"),
                "whitespace glyph is invisible",
            ));
        }
    }

    findings
}

/// Checks a dungeon definition against the generator's limits and the registry.
pub fn validate_dungeon_definition(
    definition: &DungeonDefinition,
    registry: &ContentRegistry,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let generator = &definition.generator;

    if definition.id.is_empty() {
        findings.push(Finding::error("id", "dungeon id must not be empty"));
    }
    if generator.room_min_size < GeneratorConfig::MIN_ROOM_SIZE {
        findings.push(Finding::error(
            "generator.room_min_size",
            format!(
                "rooms must be at least {} tiles",
                GeneratorConfig::MIN_ROOM_SIZE
            ),
        ));
    }
    if generator.room_max_size < generator.room_min_size {
        findings.push(Finding::error(
            "generator.room_max_size",
            "room_max_size is smaller than room_min_size",
        ));
    }
    if generator.max_rooms == 0 {
        findings.push(Finding::error("generator.max_rooms", "no room placements"));
    }
    if generator.levels == 0 {
        findings.push(Finding::error("generator.levels", "at least one level is required"));
    }

    // The smallest room plus its surrounding wall has to fit on both axes.
    let smallest = i64::from(generator.room_min_size.max(GeneratorConfig::MIN_ROOM_SIZE));
    if i64::from(definition.width) <= smallest {
        findings.push(Finding::error(
            "width",
            format!(
                "width {} cannot hold a room of size {}",
                definition.width, generator.room_min_size
            ),
        ));
    }
    if i64::from(definition.height) <= smallest {
        findings.push(Finding::error(
            "height",
            format!(
                "height {} cannot hold a room of size {}",
                definition.height, generator.room_min_size
            ),
        ));
    }

    if definition.enemy_templates.is_empty() {
        findings.push(Finding::warning("enemy_templates", "dungeon has no enemy spawns"));
    }
    for (index, key) in definition.enemy_templates.iter().enumerate() {
        let field = format!("enemy_templates[{index}]");
        match registry.entity_template(key) {
            None => findings.push(Finding::error(
                field,
                format!("unknown entity template `{key}`"),
            )),
            Some(template) if template.kind != EntityKind::Enemy => findings.push(Finding::error(
                field,
                format!("template `{key}` is not an enemy"),
            )),
            Some(_) => {}
        }
    }

    findings
}

/// Checks the campaign graph: references must resolve, every node should be
/// reachable from `start`.
pub fn validate_campaign(
    campaign: &CampaignDefinition,
    dungeons: &[DungeonDefinition],
) -> Vec<Finding> {
    let mut findings = Vec::new();
    if campaign.nodes.is_empty() {
        findings.push(Finding::error("nodes", "campaign has no nodes"));
        return findings;
    }

    let known_dungeons: BTreeSet<&str> = dungeons.iter().map(|d| d.id.as_str()).collect();
    let mut node_ids = BTreeSet::new();
    for (index, node) in campaign.nodes.iter().enumerate() {
        if node.id.is_empty() {
            findings.push(Finding::error(
                format!("nodes[{index}].id"),
                "node id must not be empty",
            ));
        } else if !node_ids.insert(node.id.as_str()) {
            findings.push(Finding::error(
                format!("nodes[{index}].id"),
                format!("duplicate node `{}`", node.id),
            ));
        }
        if !known_dungeons.contains(node.dungeon.as_str()) {
            findings.push(Finding::error(
                format!("nodes[{index}].dungeon"),
                format!("unknown dungeon `{}`", node.dungeon),
            ));
        }
    }

    for (index, node) in campaign.nodes.iter().enumerate() {
        for (edge, next) in node.next.iter().enumerate() {
            if !node_ids.contains(next.as_str()) {
                findings.push(Finding::error(
                    format!("nodes[{index}].next[{edge}]"),
                    format!("unknown node `{next}`"),
                ));
            }
        }
    }

    if !node_ids.contains(campaign.start.as_str()) {
        findings.push(Finding::error(
            "start",
            format!("start node `{}` does not exist", campaign.start),
        ));
        return findings;
    }

    let mut reachable = BTreeSet::from([campaign.start.as_str()]);
    let mut queue = VecDeque::from([campaign.start.as_str()]);
    while let Some(id) = queue.pop_front() {
        let Some(node) = campaign.node(id) else {
            continue;
        };
        for next in &node.next {
            if node_ids.contains(next.as_str()) && reachable.insert(next.as_str()) {
                queue.push_back(next.as_str());
            }
        }
    }
    for (index, node) in campaign.nodes.iter().enumerate() {
        if !reachable.contains(node.id.as_str()) {
            findings.push(Finding::warning(
                format!("nodes[{index}]"),
                format!("node `{}` is unreachable from `{}`", node.id, campaign.start),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use game_core::{EquipSlot, TileKind};

    use super::*;
    use crate::definitions::CampaignNode;
    use crate::pack::{EntityTemplate, ItemTemplate, PackManifest, TileTemplate};

    fn pack() -> ContentPack {
        ContentPack::new(PackManifest::new("base", "1.0.0"))
            .with_item(ItemTemplate::new("sword", ItemKind::Weapon))
            .with_item(ItemTemplate::new("helm", ItemKind::Armor))
            .with_entity(
                EntityTemplate::new("knight", EntityKind::Player, 30, 5)
                    .with_equipment(EquipSlot::Weapon, "sword"),
            )
            .with_entity(EntityTemplate::new("goblin", EntityKind::Enemy, 8, 2))
            .with_tile(TileTemplate {
                id: "floor".into(),
                name: "Floor".into(),
                kind: TileKind::Floor,
                glyph: '.',
            })
    }

    fn registry() -> ContentRegistry {
        let mut registry = ContentRegistry::new();
        registry.register_pack(pack()).unwrap();
        registry
    }

    #[test]
    fn clean_pack_has_no_findings() {
        assert_eq!(validate_pack(&pack()), Vec::new());
    }

    #[test]
    fn pack_errors_are_addressed_by_field() {
        let mut broken = pack();
        broken.manifest.id = "base:x".into();
        broken.entities[1].max_hp = 0;
        broken.entities.push(EntityTemplate::new("goblin", EntityKind::Enemy, 5, 1));
        broken.entities[0].equipment.push((EquipSlot::Weapon, "helm".into()));
        broken.entities[0].equipment.push((EquipSlot::Hands, "gauntlet".into()));

        let findings = validate_pack(&broken);
        let fields: Vec<_> = findings.iter().map(|f| f.field.as_str()).collect();
        assert!(fields.contains(&"manifest.id"));
        assert!(fields.contains(&"entities[1].max_hp"));
        assert!(fields.contains(&"entities[2].id"));
        assert!(fields.contains(&"entities[0].equipment[1]"));
        assert!(fields.contains(&"entities[0].equipment[2]"));
        assert!(findings.iter().all(Finding::is_error));
    }

    #[test]
    fn empty_pack_only_warns() {
        let findings = validate_pack(&ContentPack::new(PackManifest::new("empty", "0.1")));
        assert_eq!(findings.len(), 1);
        assert!(!has_errors(&findings));
    }

    #[test]
    fn dungeon_without_enemies_warns() {
        let definition = DungeonDefinition::new("crypt", 50, 50);
        let findings = validate_dungeon_definition(&definition, &registry());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].field, "enemy_templates");
    }

    #[test]
    fn dungeon_template_references_are_checked() {
        let definition = DungeonDefinition::new("crypt", 50, 50)
            .with_enemy("base:goblin")
            .with_enemy("base:knight")
            .with_enemy("base:dragon");
        let findings = validate_dungeon_definition(&definition, &registry());
        let fields: Vec<_> = findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["enemy_templates[1]", "enemy_templates[2]"]);
    }

    #[test]
    fn tiny_dungeon_is_rejected() {
        let definition = DungeonDefinition::new("closet", 6, 40).with_enemy("base:goblin");
        let findings = validate_dungeon_definition(&definition, &registry());
        assert!(has_errors(&findings));
        assert_eq!(findings[0].field, "width");
    }

    #[test]
    fn single_tile_rooms_are_rejected() {
        let mut definition = DungeonDefinition::new("cells", 50, 50).with_enemy("base:goblin");
        definition.generator.room_min_size = 1;
        definition.generator.room_max_size = 1;
        let findings = validate_dungeon_definition(&definition, &registry());
        let fields: Vec<_> = findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["generator.room_min_size"]);
        assert!(has_errors(&findings));
    }

    #[test]
    fn campaign_reports_unreachable_nodes_as_warnings() {
        let dungeons = vec![DungeonDefinition::new("crypt", 50, 50)];
        let campaign = CampaignDefinition {
            id: "main".into(),
            start: "a".into(),
            nodes: vec![
                CampaignNode::new("a", "crypt").leads_to("b"),
                CampaignNode::new("b", "crypt"),
                CampaignNode::new("orphan", "crypt"),
            ],
        };
        let findings = validate_campaign(&campaign, &dungeons);
        assert_eq!(
            findings,
            vec![Finding::warning(
                "nodes[2]",
                "node `orphan` is unreachable from `a`"
            )]
        );
    }

    #[test]
    fn campaign_reference_errors() {
        let campaign = CampaignDefinition {
            id: "main".into(),
            start: "missing".into(),
            nodes: vec![CampaignNode::new("a", "nowhere").leads_to("ghost")],
        };
        let findings = validate_campaign(&campaign, &[]);
        let fields: Vec<_> = findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["nodes[0].dungeon", "nodes[0].next[0]", "start"]);
        assert!(has_errors(&findings));
    }
}
