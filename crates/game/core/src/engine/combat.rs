use super::board::Board;
use crate::action::GameEvent;
use crate::state::EntityId;

/// Melee hit: the defender loses exactly the attacker's base attack.
///
/// Emits `attacked`, followed by `killed` when the hit is fatal. The defender
/// stays on the board until end-of-turn cleanup.
pub(crate) fn melee(
    board: &mut Board,
    attacker_id: EntityId,
    defender_id: EntityId,
    events: &mut Vec<GameEvent>,
) {
    let Some(attacker) = board.live(attacker_id) else {
        return;
    };
    let Some(defender) = board.live(defender_id) else {
        return;
    };
    if !attacker.kind.opposes(defender.kind) {
        return;
    }
    let damage = attacker.attack.max(0);
    let position = defender.position;

    let Some(outcome) = board.damage(defender_id, damage) else {
        return;
    };
    events.push(GameEvent::Attacked {
        attacker_id,
        defender_id,
        damage,
        hp_before: outcome.hp_before,
        hp_after: outcome.hp_after,
    });
    if outcome.killed {
        events.push(GameEvent::Killed {
            entity_id: defender_id,
            killer_id: attacker_id,
            position,
        });
    }
}
