//! Action resolution: hit roll, damage, energy and the log entry
//!
//! This is the only place that changes a combatant's hp or energy.

use crate::action::{ActionKind, ActionResult, AppliedEffect};
use crate::error::{BattleError, EngineResult};
use crate::limits::{ATTACKER_ENERGY_GAIN, TARGET_ENERGY_GAIN};
use crate::log;
use crate::rng::BattleRng;
use crate::state::Battle;
use crate::types::{CombatantId, Skill, SkillEffect, SkillId, SkillKind};

/// Defense at which half of the incoming damage is absorbed
pub const DEFENSE_CONSTANT: f64 = 1000.0;
pub const MAGICAL_DAMAGE_BONUS: f64 = 1.2;
pub const VARIANCE_MIN: f64 = 0.9;
pub const VARIANCE_SPREAD: f64 = 0.2;

/// Random parts of one damage roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    /// Critical damage multiplier, `None` if the hit did not crit
    pub critical: Option<f64>,
    /// Variance factor in [0.9, 1.1]
    pub variance: f64,
}

impl DamageRoll {
    /// A roll with no critical and no variance
    pub fn flat() -> Self {
        Self {
            critical: None,
            variance: 1.0,
        }
    }
}

/// Fraction of damage that gets through `defense`.
///
/// Diminishing returns: never reaches zero, approaches it as defense grows.
pub fn mitigation_factor(defense: f64) -> f64 {
    let defense = defense.max(0.0);
    1.0 - defense / (defense + DEFENSE_CONSTANT)
}

/// Damage of a confirmed hit. Always at least 1.
pub fn compute_damage(attack: f64, defense: f64, skill: &Skill, roll: DamageRoll) -> u32 {
    let mut damage = attack * skill.multiplier;
    damage *= mitigation_factor(defense);
    if let Some(critical_damage) = roll.critical {
        damage *= critical_damage;
    }
    damage *= roll.variance;
    if skill.kind == SkillKind::Magical {
        damage *= MAGICAL_DAMAGE_BONUS;
    }
    // NaN and negatives cast to 0.
    (damage.floor() as u32).max(1)
}

fn describe(actor: &str, target: &str, skill: Option<&str>) -> String {
    match skill {
        Some(name) => format!("{} uses {} on {}", actor, name, target),
        None => format!("{} attacks {}", actor, target),
    }
}

/// Resolve one attack (or skill use) of `attacker_id` against `target_id`.
///
/// Both combatants must exist, be alive, and stand on opposite sides;
/// otherwise nothing changes and `InvalidTarget` is returned. An unknown
/// skill, or one still cooling down, degrades to a basic attack. A miss
/// changes nothing but the log.
pub fn execute_attack<R: BattleRng>(
    battle: &mut Battle<R>,
    attacker_id: CombatantId,
    target_id: CombatantId,
    skill_id: Option<SkillId>,
) -> EngineResult<ActionResult> {
    if battle.is_ended() {
        return Err(BattleError::BattleEnded);
    }
    let round = battle.round();

    let (attacker, target) = match (battle.combatant(attacker_id), battle.combatant(target_id)) {
        (Some(a), Some(t)) if a.is_alive() && t.is_alive() && a.team() != t.team() => (a, t),
        _ => {
            log::result(
                false,
                &format!("{} -> {}: invalid target", attacker_id, target_id),
            );
            return Err(BattleError::InvalidTarget);
        }
    };

    let skill = skill_id
        .filter(|id| attacker.skill_ready(*id, round))
        .and_then(|id| attacker.skill(id))
        .cloned();
    let actor_name = attacker.name.clone();
    let target_name = target.name.clone();
    let accuracy = attacker.stats.accuracy;
    let critical_rate = attacker.stats.critical_rate;
    let critical_damage = attacker.stats.critical_damage;
    let attack = attacker.effective_attack(round);
    let evasion = target.stats.evasion;
    let defense = target.effective_defense(round);

    let skill_name = skill.as_ref().map(|s| s.name.clone());
    let headline = describe(&actor_name, &target_name, skill_name.as_deref());
    let timestamp = battle.next_timestamp();

    // 1. Hit check
    let hit_chance = accuracy - evasion;
    if battle.rng.next_f64() > hit_chance {
        let target_hp = battle.combatant(target_id).map_or(0, |t| t.current_hp);
        let entry = ActionResult {
            round,
            timestamp,
            actor_id: attacker_id,
            actor_name,
            target_id,
            target_name,
            kind: ActionKind::Miss,
            skill_name,
            damage: 0,
            is_critical: false,
            target_hp,
            is_kill: false,
            effects: Vec::new(),
            message: format!("{} but misses", headline),
        };
        log::action("miss", &entry.message);
        battle.push_log(entry.clone());
        return Ok(entry);
    }

    // 2. Damage
    let is_critical = battle.rng.next_f64() < critical_rate;
    let variance = VARIANCE_MIN + battle.rng.next_f64() * VARIANCE_SPREAD;
    let roll = DamageRoll {
        critical: is_critical.then_some(critical_damage),
        variance,
    };
    let basic = Skill::basic_attack();
    let damage = compute_damage(attack, defense, skill.as_ref().unwrap_or(&basic), roll);

    // 3. Apply damage and target energy
    let (target_hp, is_kill) = match battle.combatant_mut(target_id) {
        Some(target) => {
            target.take_damage(damage);
            target.gain_energy(TARGET_ENERGY_GAIN);
            (target.current_hp, !target.is_alive())
        }
        None => return Err(BattleError::InvalidTarget),
    };

    // 4. Attacker energy and skill effects
    let mut effects = Vec::new();
    if let Some(attacker) = battle.combatant_mut(attacker_id) {
        attacker.gain_energy(ATTACKER_ENERGY_GAIN);
        if let Some(s) = &skill {
            attacker.start_cooldown(s, round);
            for effect in &s.effects {
                match effect {
                    SkillEffect::Heal { amount } => {
                        let restored = attacker.heal(*amount);
                        effects.push(AppliedEffect::Healed {
                            amount: restored,
                            new_hp: attacker.current_hp,
                        });
                    }
                    SkillEffect::Buff {
                        stat,
                        percent,
                        rounds,
                    } => {
                        attacker.add_buff(*stat, *percent, *rounds, round);
                        effects.push(AppliedEffect::Buffed {
                            stat: *stat,
                            percent: *percent,
                            rounds: *rounds,
                        });
                    }
                    SkillEffect::Custom { key, value } => {
                        effects.push(AppliedEffect::Custom {
                            key: key.clone(),
                            value: *value,
                        });
                    }
                }
            }
        }
    }

    let kind = if skill.is_some() {
        ActionKind::Skill
    } else {
        ActionKind::Attack
    };
    let mut message = format!("{} for {} damage", headline, damage);
    if is_critical {
        message.push_str(" (critical)");
    }
    if is_kill {
        message.push_str(&format!(", {} is defeated", target_name));
    }

    let entry = ActionResult {
        round,
        timestamp,
        actor_id: attacker_id,
        actor_name,
        target_id,
        target_name,
        kind,
        skill_name,
        damage,
        is_critical,
        target_hp,
        is_kill,
        effects,
        message,
    };
    log::action("hit", &entry.message);
    battle.push_log(entry.clone());
    Ok(entry)
}
