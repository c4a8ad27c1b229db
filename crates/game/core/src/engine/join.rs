use super::board::Board;
use crate::action::GameEvent;
use crate::state::{Entity, EntityId, Equipment, GameState, Inventory, VisionProfile};

/// Adds a player with `actor_id` at the spawn point, or the nearest free tile.
///
/// Ids already present on any level, and levels with no free tile, make the
/// join a no-op.
pub(crate) fn apply_join(
    state: &mut GameState,
    board: &mut Board,
    actor_id: EntityId,
) -> Option<GameEvent> {
    if board.get(actor_id).is_some() || state.contains_entity(actor_id) {
        return None;
    }
    let position = board.nearest_free(&state.dungeon, state.spawn)?;

    let rules = state.rules;
    state.ids_mut().reserve(actor_id);
    let player = Entity::player(actor_id, position, rules.player)
        .with_inventory(Inventory::with_capacity(rules.inventory_capacity))
        .with_equipment(Equipment::empty())
        .with_vision(VisionProfile::circle(rules.vision_range));
    board.insert(player);

    Some(GameEvent::Joined {
        entity_id: actor_id,
        position,
    })
}
