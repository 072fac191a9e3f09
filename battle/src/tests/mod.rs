mod lifecycle;

use std::collections::VecDeque;

use crate::combatant::Combatant;
use crate::config::{BattleConfig, TieBreak};
use crate::rng::{BattleRng, XorShiftRng};
use crate::state::Battle;
use crate::stats::CombatantStats;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Rng that hands out queued floats first, then a fixed fallback value.
///
/// Integer draws (used by the speed tie shuffle) come from a seeded XorShift.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng {
    draws: VecDeque<f64>,
    fallback: f64,
    ints: XorShiftRng,
}

impl ScriptedRng {
    /// Every float draw returns `value`
    pub(crate) fn always(value: f64) -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: value,
            ints: XorShiftRng::seed_from_u64(1),
        }
    }

    /// Queued draws first, then 0.5 (hit, no critical, no variance)
    pub(crate) fn queued(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            ..Self::always(0.5)
        }
    }
}

impl BattleRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.ints.next_u32()
    }

    fn next_f64(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> CombatantStats {
    CombatantStats {
        hp,
        attack,
        defense,
        speed,
        critical_rate: 0.05,
        critical_damage: 1.5,
        accuracy: 0.95,
        evasion: 0.05,
    }
}

fn fighter(id: CombatantId, name: &str, hp: u32, attack: u32, defense: u32, speed: u32) -> Combatant {
    Combatant::with_stats(id, name, "test_dummy", stats(hp, attack, defense, speed), Vec::new())
}

fn create_template(name: &str, hp: u32, attack: u32, defense: u32, speed: u32) -> HeroTemplate {
    HeroTemplate::new(&name.to_lowercase(), name, hp, attack, defense, speed)
}

fn create_spec(name: &str, hp: u32, attack: u32, defense: u32, speed: u32, position: u8) -> CombatantSpec {
    CombatantSpec::new(create_template(name, hp, attack, defense, speed), 1, 1, position)
}

fn create_sandbag(position: u8) -> Combatant {
    fighter(CombatantId::enemy(position), "Sandbag", 10_000, 0, 0, 1)
}

fn formation_config() -> BattleConfig {
    BattleConfig::seeded(42).with_tie_break(TieBreak::Formation)
}

fn scripted_battle(player: Vec<Combatant>, enemy: Vec<Combatant>, rng: ScriptedRng) -> Battle<ScriptedRng> {
    Battle::from_combatants(1, BattleKind::Stage, player, enemy, formation_config(), rng)
        .expect("test battle should be valid")
}

fn duel(attacker: Combatant, target: Combatant, draws: &[f64]) -> Battle<ScriptedRng> {
    scripted_battle(vec![attacker], vec![target], ScriptedRng::queued(draws))
}

fn seeded_battle(player: &[CombatantSpec], enemy: &[CombatantSpec], seed: u64) -> Battle {
    Battle::new(7, BattleKind::Pvp, player, enemy, BattleConfig::seeded(seed))
        .expect("test battle should be valid")
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
