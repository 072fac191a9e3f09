//! Enemy formations for PVE stages
//!
//! Every stage rolls one of three archetypes from its seed. The archetype
//! decides which starter heroes show up; stage number sets their level and
//! star, and difficulty scales their base stats.

use hero_battle::log;
use hero_battle::{BattleRng, CombatantSpec, XorShiftRng};
use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::TemplateCatalog;
use crate::error::GameResult;

/// Stages after which the lineup stops changing; only level and star keep growing
pub const LINEUP_TIERS: u32 = 10;
/// Enemy star grows by one every this many stages
pub const STAGES_PER_STAR: u32 = 10;
pub const MAX_ENEMY_STAR: u32 = 6;

/// Mixed into the stage seed so the archetype roll and the battle rng are
/// separate streams
const ARCHETYPE_SEED_SALT: u64 = 0x5354_4147_45;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, MaxEncodedLen, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    /// Factor applied to enemy hp, attack and defense. Speed is left alone.
    pub fn stat_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
            Difficulty::Nightmare => 1.6,
        }
    }
}

/// Enemy "personality" for a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Archetype {
    /// Many fast, fragile goblins led by orcs
    Horde,
    /// Few heavily armoured front-liners
    Bulwark,
    /// Casters with magical skills
    Arcane,
}

impl Archetype {
    /// Archetype a stage seed rolls
    pub fn roll(seed: u64) -> Self {
        let mut rng = XorShiftRng::seed_from_u64(seed ^ ARCHETYPE_SEED_SALT);
        match rng.gen_range(3) {
            0 => Archetype::Horde,
            1 => Archetype::Bulwark,
            _ => Archetype::Arcane,
        }
    }

    /// Template ids for a lineup tier (1-10), front slot first
    pub fn lineup(self, tier: u32) -> Vec<&'static str> {
        match self {
            Archetype::Horde => horde_lineup(tier),
            Archetype::Bulwark => bulwark_lineup(tier),
            Archetype::Arcane => arcane_lineup(tier),
        }
    }
}

fn horde_lineup(tier: u32) -> Vec<&'static str> {
    match tier {
        1 => vec!["goblin_scout", "goblin_scout"],
        2 => vec!["goblin_grunt", "goblin_scout", "goblin_scout"],
        3 => vec!["goblin_grunt", "goblin_grunt", "goblin_scout"],
        4 => vec!["wolf_rider", "goblin_grunt", "goblin_scout", "goblin_scout"],
        5 => vec!["wolf_rider", "goblin_grunt", "goblin_grunt", "goblin_scout"],
        6 => vec!["orc_warchief", "wolf_rider", "goblin_grunt", "goblin_scout", "goblin_scout"],
        7 => vec!["orc_warchief", "wolf_rider", "wolf_rider", "goblin_grunt", "goblin_scout"],
        8 => vec!["orc_warchief", "wolf_rider", "wolf_rider", "goblin_grunt", "goblin_grunt"],
        9 => vec!["orc_warchief", "orc_warchief", "wolf_rider", "wolf_rider", "goblin_grunt"],
        _ => vec!["orc_warchief", "orc_warchief", "wolf_rider", "wolf_rider", "wolf_rider"],
    }
}

fn bulwark_lineup(tier: u32) -> Vec<&'static str> {
    match tier {
        1 => vec!["shield_bearer", "goblin_scout"],
        2 => vec!["shield_bearer", "shield_bearer"],
        3 => vec!["shield_bearer", "shield_bearer", "apprentice"],
        4 => vec!["stone_golem", "shield_bearer", "apprentice"],
        5 => vec!["stone_golem", "shield_bearer", "shield_bearer", "goblin_grunt"],
        6 => vec!["stone_golem", "stone_golem", "shield_bearer", "goblin_grunt"],
        7 => vec!["iron_paladin", "stone_golem", "shield_bearer", "goblin_grunt"],
        8 => vec!["iron_paladin", "stone_golem", "stone_golem", "shield_bearer"],
        9 => vec!["iron_paladin", "iron_paladin", "stone_golem", "stone_golem", "shield_bearer"],
        _ => vec!["iron_paladin", "iron_paladin", "stone_golem", "stone_golem", "dragon_tyrant"],
    }
}

fn arcane_lineup(tier: u32) -> Vec<&'static str> {
    match tier {
        1 => vec!["goblin_grunt", "apprentice"],
        2 => vec!["shield_bearer", "apprentice"],
        3 => vec!["goblin_grunt", "apprentice", "apprentice"],
        4 => vec!["shield_bearer", "frost_witch", "apprentice"],
        5 => vec!["shield_bearer", "frost_witch", "frost_witch", "apprentice"],
        6 => vec!["stone_golem", "storm_sage", "frost_witch", "apprentice"],
        7 => vec!["stone_golem", "storm_sage", "frost_witch", "frost_witch", "apprentice"],
        8 => vec!["lich", "storm_sage", "frost_witch", "frost_witch", "apprentice"],
        9 => vec!["lich", "storm_sage", "storm_sage", "frost_witch", "frost_witch"],
        _ => vec!["lich", "lich", "storm_sage", "storm_sage", "dragon_tyrant"],
    }
}

fn scale_base(value: u32, multiplier: f64) -> u32 {
    (value as f64 * multiplier).floor() as u32
}

/// Enemy formation for `stage` (1-based; 0 counts as 1).
///
/// The same catalog, stage, difficulty and seed always give the same
/// formation.
pub fn generate_stage_enemies(
    catalog: &TemplateCatalog,
    stage: u32,
    difficulty: Difficulty,
    seed: u64,
) -> GameResult<Vec<CombatantSpec>> {
    let stage = stage.max(1);
    let archetype = Archetype::roll(seed);
    let tier = stage.min(LINEUP_TIERS);
    let star = (1 + (stage - 1) / STAGES_PER_STAR).min(MAX_ENEMY_STAR);
    let multiplier = difficulty.stat_multiplier();

    log::debug(
        "opponents",
        &format!(
            "stage {} ({:?}, {:?}): level {} star {}",
            stage, archetype, difficulty, stage, star
        ),
    );

    archetype
        .lineup(tier)
        .into_iter()
        .enumerate()
        .map(|(slot, template_id)| {
            let mut template = catalog.get(template_id)?.clone();
            template.base.hp = scale_base(template.base.hp, multiplier).max(1);
            template.base.attack = scale_base(template.base.attack, multiplier);
            template.base.defense = scale_base(template.base.defense, multiplier);
            Ok(CombatantSpec::new(template, stage, star, slot as u8))
        })
        .collect()
}
