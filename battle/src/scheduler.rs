use crate::config::TieBreak;
use crate::rng::BattleRng;
use crate::state::Battle;
use crate::types::CombatantId;

/// Action order for one round: every living combatant of both teams, fastest first.
///
/// Equal speeds are ordered by the battle's tie-break. With `TieBreak::Random`
/// the candidates are shuffled before a stable sort, so ties come out in a
/// fresh random order on every call.
pub fn order_actors<R: BattleRng>(battle: &mut Battle<R>) -> Vec<CombatantId> {
    let mut living: Vec<(CombatantId, u32)> = battle
        .combatants()
        .filter(|c| c.is_alive())
        .map(|c| (c.id, c.stats.speed))
        .collect();

    let tie_break = battle.config().tie_break;
    match tie_break {
        TieBreak::Random => {
            battle.rng.shuffle(&mut living);
            living.sort_by(|a, b| b.1.cmp(&a.1));
        }
        TieBreak::Formation => {
            living.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        }
    }

    living.into_iter().map(|(id, _)| id).collect()
}
