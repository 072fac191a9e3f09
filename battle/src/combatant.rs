use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::limits::{Team, MAX_ENERGY};
use crate::stats::{compute_stats, CombatantStats};
use crate::types::{BuffStat, CombatantId, CombatantSpec, Skill, SkillId};

/// Timed percentage modifier on a combatant stat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buff {
    pub stat: BuffStat,
    pub percent: i32,
    /// Last round in which the buff still applies
    pub expires_after_round: u32,
}

impl Buff {
    pub fn is_active(&self, round: u32) -> bool {
        round <= self.expires_after_round
    }
}

/// Battle-scoped instance of a hero with live health and energy.
///
/// Invariants: `alive == (current_hp > 0)`, `current_hp <= max_hp`,
/// `energy <= MAX_ENERGY`. Only the action resolver changes hp and energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub template_id: String,
    pub stats: CombatantStats,
    pub current_hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub alive: bool,
    pub skills: Vec<Skill>,
    /// First round in which each used skill becomes available again
    pub cooldowns: HashMap<SkillId, u32>,
    pub buffs: Vec<Buff>,
}

impl Combatant {
    pub fn from_spec(team: Team, spec: &CombatantSpec) -> Self {
        let stats = compute_stats(&spec.template, spec.level, spec.star);
        Self::with_stats(
            CombatantId {
                team,
                position: spec.position,
            },
            &spec.template.name,
            &spec.template.template_id,
            stats,
            spec.template.skills.clone(),
        )
    }

    pub fn with_stats(
        id: CombatantId,
        name: &str,
        template_id: &str,
        stats: CombatantStats,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            template_id: template_id.to_string(),
            stats,
            current_hp: stats.hp,
            max_hp: stats.hp,
            energy: 0,
            alive: stats.hp > 0,
            skills,
            cooldowns: HashMap::new(),
            buffs: Vec::new(),
        }
    }

    pub fn team(&self) -> Team {
        self.id.team
    }

    pub fn position(&self) -> u8 {
        self.id.position
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Saturating damage; returns the hp actually removed.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        self.alive = self.current_hp > 0;
        dealt
    }

    /// Heal a living combatant up to max hp; returns the hp actually restored.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let restored = amount.min(self.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    pub(crate) fn gain_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(MAX_ENERGY);
    }

    // i64: a stack of large buffs may exceed i32.
    fn buff_percent(&self, stat: BuffStat, round: u32) -> i64 {
        self.buffs
            .iter()
            .filter(|b| b.stat == stat && b.is_active(round))
            .fold(0i64, |sum, b| sum.saturating_add(b.percent as i64))
    }

    fn buffed(base: u32, percent: i64) -> f64 {
        (base as f64 * (100.0 + percent as f64) / 100.0).max(0.0)
    }

    pub fn effective_attack(&self, round: u32) -> f64 {
        Self::buffed(self.stats.attack, self.buff_percent(BuffStat::Attack, round))
    }

    pub fn effective_defense(&self, round: u32) -> f64 {
        Self::buffed(self.stats.defense, self.buff_percent(BuffStat::Defense, round))
    }

    pub fn skill(&self, skill_id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    pub fn skill_ready(&self, skill_id: SkillId, round: u32) -> bool {
        self.cooldowns
            .get(&skill_id)
            .map_or(true, |ready_at| round >= *ready_at)
    }

    /// First skill that can be used this round, in template order
    pub fn first_ready_skill(&self, round: u32) -> Option<&Skill> {
        self.skills.iter().find(|s| self.skill_ready(s.id, round))
    }

    pub(crate) fn start_cooldown(&mut self, skill: &Skill, round: u32) {
        let ready_at = round.saturating_add(skill.cooldown).saturating_add(1);
        self.cooldowns.insert(skill.id, ready_at);
    }

    pub(crate) fn add_buff(&mut self, stat: BuffStat, percent: i32, rounds: u32, round: u32) {
        if rounds == 0 {
            return;
        }
        self.buffs.push(Buff {
            stat,
            percent,
            expires_after_round: round.saturating_add(rounds - 1),
        });
    }

    /// Drop buffs that no longer apply in `round`
    pub(crate) fn prune_buffs(&mut self, round: u32) {
        self.buffs.retain(|b| b.is_active(round));
    }
}
