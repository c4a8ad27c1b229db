use game_core::{EnemySpawner, Entity, IdAllocator, Position};

use crate::pack::EntityTemplate;

/// Enemy spawner backed by registry templates.
///
/// Spawn point `i` on level `n` gets template `(n + i) % len`, so deeper
/// levels open with a different mix while staying fully deterministic.
#[derive(Clone, Debug)]
pub struct TemplateSpawner {
    templates: Vec<(String, EntityTemplate)>,
}

impl TemplateSpawner {
    /// Built through [`crate::ContentRegistry::spawner`], which guarantees a
    /// non-empty list of enemy templates.
    pub(crate) fn new(templates: Vec<(String, EntityTemplate)>) -> Self {
        Self { templates }
    }

    pub fn template_keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|(key, _)| key.as_str())
    }
}

impl EnemySpawner for TemplateSpawner {
    fn spawn(&self, level: usize, positions: &[Position], ids: &mut IdAllocator) -> Vec<Entity> {
        if self.templates.is_empty() {
            return Vec::new();
        }
        positions
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let (key, template) = &self.templates[(level + index) % self.templates.len()];
                template.instantiate(key, ids.allocate(), position)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EntityId, EntityKind};

    use super::*;

    fn spawner() -> TemplateSpawner {
        TemplateSpawner::new(vec![
            (
                "base:goblin".into(),
                EntityTemplate::new("goblin", EntityKind::Enemy, 8, 2),
            ),
            (
                "base:orc".into(),
                EntityTemplate::new("orc", EntityKind::Enemy, 15, 4),
            ),
        ])
    }

    #[test]
    fn rotates_templates_by_level_and_slot() {
        let positions = [Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)];
        let mut ids = IdAllocator::new(10);

        let first = spawner().spawn(0, &positions, &mut ids);
        let names: Vec<_> = first.iter().filter_map(|e| e.template.as_deref()).collect();
        assert_eq!(names, vec!["base:goblin", "base:orc", "base:goblin"]);
        assert_eq!(first[0].id, EntityId(10));

        let second = spawner().spawn(1, &positions[..1], &mut ids);
        assert_eq!(second[0].template.as_deref(), Some("base:orc"));
        assert_eq!(second[0].id, EntityId(13));
    }

    #[test]
    fn same_inputs_same_enemies() {
        let positions = [Position::new(4, 4), Position::new(5, 5)];
        let a = spawner().spawn(2, &positions, &mut IdAllocator::new(1));
        let b = spawner().spawn(2, &positions, &mut IdAllocator::new(1));
        assert_eq!(a, b);
    }
}
