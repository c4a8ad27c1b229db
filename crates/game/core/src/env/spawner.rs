use crate::config::EntityStats;
use crate::state::{Entity, IdAllocator, Position, VisionProfile};

/// Populates a level with enemies the first time it becomes active.
///
/// Implementations must be deterministic: the same level index, positions and
/// allocator state must always yield the same entities, or replays diverge.
pub trait EnemySpawner: Send + Sync {
    /// Creates one enemy per position, drawing fresh ids from `ids`.
    fn spawn(&self, level: usize, positions: &[Position], ids: &mut IdAllocator) -> Vec<Entity>;
}

/// Spawns plain enemies with fixed stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatSpawner {
    stats: EntityStats,
    vision_range: Option<u32>,
}

impl StatSpawner {
    pub const fn new(stats: EntityStats) -> Self {
        Self {
            stats,
            vision_range: None,
        }
    }

    /// Gives spawned enemies a circular vision profile.
    pub const fn with_vision(mut self, range: u32) -> Self {
        self.vision_range = Some(range);
        self
    }
}

impl Default for StatSpawner {
    fn default() -> Self {
        Self::new(EntityStats::DEFAULT_ENEMY)
    }
}

impl EnemySpawner for StatSpawner {
    fn spawn(&self, _level: usize, positions: &[Position], ids: &mut IdAllocator) -> Vec<Entity> {
        positions
            .iter()
            .map(|&position| {
                let enemy = Entity::enemy(ids.allocate(), position, self.stats);
                match self.vision_range {
                    Some(range) => enemy.with_vision(VisionProfile::circle(range)),
                    None => enemy,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityId;

    #[test]
    fn allocates_consecutive_ids_per_position() {
        let mut ids = IdAllocator::new(5);
        let positions = [Position::new(1, 1), Position::new(4, 2)];
        let spawned = StatSpawner::default().spawn(0, &positions, &mut ids);

        let got: Vec<_> = spawned.iter().map(|e| (e.id, e.position)).collect();
        assert_eq!(
            got,
            vec![(EntityId(5), positions[0]), (EntityId(6), positions[1])]
        );
        assert_eq!(ids.peek(), EntityId(7));
        assert!(spawned.iter().all(|e| e.is_enemy() && e.hp == 10));
    }
}
