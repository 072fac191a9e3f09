//! Stat derivation from template, level, star and quality
//!
//! Everything here is a pure function of its inputs: deriving the same
//! (template, level, star) twice always gives identical stats.

use serde::{Deserialize, Serialize};

use crate::types::HeroTemplate;

pub const BASE_CRITICAL_RATE: f64 = 0.05;
pub const CRITICAL_RATE_PER_STAR: f64 = 0.01;
pub const BASE_CRITICAL_DAMAGE: f64 = 1.5;
pub const CRITICAL_DAMAGE_PER_STAR: f64 = 0.1;
pub const BASE_ACCURACY: f64 = 0.95;
pub const BASE_EVASION: f64 = 0.05;
pub const MAX_SPEED_EVASION: f64 = 0.15;
/// Base speed that yields one full point of evasion
pub const SPEED_PER_EVASION: f64 = 2000.0;

/// Effective combat attributes of a combatant for one battle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Probability in [0, 1]
    pub critical_rate: f64,
    /// Damage multiplier on a critical hit, at least 1
    pub critical_damage: f64,
    pub accuracy: f64,
    /// Probability in [0, 1]
    pub evasion: f64,
}

pub fn level_multiplier(level: u32) -> f64 {
    1.0 + (level as f64 - 1.0) * 0.1
}

pub fn star_multiplier(star: u32) -> f64 {
    1.0 + (star as f64 - 1.0) * 0.2
}

/// Unknown tiers count as common.
pub fn quality_multiplier(quality: u8) -> f64 {
    match quality {
        1 => 1.0,
        2 => 1.2,
        3 => 1.5,
        4 => 2.0,
        5 => 2.5,
        6 => 3.0,
        _ => 1.0,
    }
}

// Float to int casts saturate, so a product below zero lands on 0.
fn scale(base: u32, multiplier: f64) -> u32 {
    (base as f64 * multiplier).floor() as u32
}

/// Derive battle stats for a hero at the given level and star.
///
/// Level and star are expected to be at least 1. Smaller values are not
/// rejected: the multipliers simply drop below 1.
pub fn compute_stats(template: &HeroTemplate, level: u32, star: u32) -> CombatantStats {
    let level_mult = level_multiplier(level);
    let star_mult = star_multiplier(star);
    let quality_mult = quality_multiplier(template.quality);
    let growth = level_mult * star_mult * quality_mult;

    // Speed grows at half the level rate and ignores quality.
    let speed_mult = (1.0 + (level_mult - 1.0) * 0.5) * star_mult;

    let base = &template.base;
    let star_steps = star as f64 - 1.0;

    CombatantStats {
        hp: scale(base.hp, growth),
        attack: scale(base.attack, growth),
        defense: scale(base.defense, growth),
        speed: scale(base.speed, speed_mult),
        critical_rate: BASE_CRITICAL_RATE + star_steps * CRITICAL_RATE_PER_STAR,
        critical_damage: BASE_CRITICAL_DAMAGE + star_steps * CRITICAL_DAMAGE_PER_STAR,
        accuracy: BASE_ACCURACY,
        evasion: BASE_EVASION + (base.speed as f64 / SPEED_PER_EVASION).min(MAX_SPEED_EVASION),
    }
}
