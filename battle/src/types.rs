use core::fmt;

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::limits::Team;

/// Unique identifier for skills within a template
pub type SkillId = u32;

/// Identifies one combatant in a battle: its side and formation slot
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    TypeInfo,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct CombatantId {
    pub team: Team,
    pub position: u8,
}

impl CombatantId {
    pub fn player(position: u8) -> Self {
        Self {
            team: Team::Player,
            position,
        }
    }

    pub fn enemy(position: u8) -> Self {
        Self {
            team: Team::Enemy,
            position,
        }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.team {
            Team::Player => write!(f, "p-{}", self.position),
            Team::Enemy => write!(f, "e-{}", self.position),
        }
    }
}

/// What started the battle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum BattleKind {
    /// Player formation against a generated stage formation
    Stage,
    /// Player formation against another player's formation
    Pvp,
}

/// Base stats of a hero template before any progression is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Damage channel of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillKind {
    #[default]
    Physical,
    /// Magical skills deal a flat 20% extra damage
    Magical,
}

/// Stat a buff applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuffStat {
    Attack,
    Defense,
}

/// Extra effects a skill applies to its user after a confirmed hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SkillEffect {
    /// Restore health to the user, capped at max health
    Heal { amount: u32 },
    /// Percentage modifier on one of the user's stats for a number of rounds
    Buff {
        stat: BuffStat,
        percent: i32,
        rounds: u32,
    },
    /// Opaque payload for downstream consumers; the engine ignores it
    Custom { key: String, value: i64 },
}

/// An active skill of a hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Multiplier on the user's attack
    pub multiplier: f64,
    #[serde(default)]
    pub kind: SkillKind,
    /// Rounds before the skill can be used again (0 = every turn)
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub effects: Vec<SkillEffect>,
}

impl Skill {
    pub fn new(id: SkillId, name: &str, multiplier: f64, kind: SkillKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            multiplier,
            kind,
            cooldown: 0,
            effects: Vec::new(),
        }
    }

    /// The attack every combatant falls back to
    pub fn basic_attack() -> Self {
        Self::new(0, "Attack", 1.0, SkillKind::Physical)
    }

    pub fn with_cooldown(mut self, rounds: u32) -> Self {
        self.cooldown = rounds;
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Immutable content definition of a hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroTemplate {
    pub template_id: String,
    pub name: String,
    pub base: BaseStats,
    /// Quality tier, 1 (common) to 6 (mythic)
    pub quality: u8,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl HeroTemplate {
    pub fn new(template_id: &str, name: &str, hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            template_id: template_id.to_string(),
            name: name.to_string(),
            base: BaseStats {
                hp,
                attack,
                defense,
                speed,
            },
            quality: 1,
            skills: Vec::new(),
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// One occupied formation slot handed to the engine at battle start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantSpec {
    pub template: HeroTemplate,
    pub level: u32,
    pub star: u32,
    pub position: u8,
}

impl CombatantSpec {
    pub fn new(template: HeroTemplate, level: u32, star: u32, position: u8) -> Self {
        Self {
            template,
            level,
            star,
            position,
        }
    }
}
