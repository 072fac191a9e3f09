//! Battle log entries
//!
//! The log is append-only; each resolved action adds exactly one entry and
//! entries are never edited afterwards. It is the source of truth for replay.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::{BuffStat, CombatantId, SkillId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Attack,
    Skill,
    Miss,
}

/// A skill effect as it actually landed on the actor
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AppliedEffect {
    Healed { amount: u32, new_hp: u32 },
    Buffed { stat: BuffStat, percent: i32, rounds: u32 },
    Custom { key: String, value: i64 },
}

/// What the caller asks a combatant to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionChoice {
    pub actor: CombatantId,
    pub target: CombatantId,
    pub skill: Option<SkillId>,
}

impl ActionChoice {
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self {
            actor,
            target,
            skill: None,
        }
    }

    pub fn skill(actor: CombatantId, target: CombatantId, skill: SkillId) -> Self {
        Self {
            actor,
            target,
            skill: Some(skill),
        }
    }
}

/// One resolved action
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub round: u32,
    /// Position of this entry in the battle log
    pub timestamp: u64,
    pub actor_id: CombatantId,
    pub actor_name: String,
    pub target_id: CombatantId,
    pub target_name: String,
    pub kind: ActionKind,
    /// Name of the skill used, `None` for a basic attack
    pub skill_name: Option<String>,
    pub damage: u32,
    pub is_critical: bool,
    pub target_hp: u32,
    pub is_kill: bool,
    pub effects: Vec<AppliedEffect>,
    pub message: String,
}
