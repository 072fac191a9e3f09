//! View types handed to the caller once a battle is over
//!
//! `BattleReport` is the full result for the rewards/persistence side;
//! `BattleRecord` is its compact SCALE-encoded form.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::action::ActionResult;
use crate::combatant::Combatant;
use crate::rng::BattleRng;
use crate::state::{Battle, Winner};
use crate::types::{BattleKind, CombatantId};

/// Final state of one combatant
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub template_id: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub alive: bool,
}

impl From<&Combatant> for CombatantView {
    fn from(c: &Combatant) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            template_id: c.template_id.clone(),
            current_hp: c.current_hp,
            max_hp: c.max_hp,
            energy: c.energy,
            alive: c.is_alive(),
        }
    }
}

/// Everything the rewards collaborator needs from a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    pub battle_id: u64,
    pub kind: BattleKind,
    pub seed: Option<u64>,
    pub ended: bool,
    pub winner: Option<Winner>,
    pub rounds: u32,
    pub log: Vec<ActionResult>,
    pub combatants: Vec<CombatantView>,
}

impl BattleReport {
    pub fn survivors(&self) -> impl Iterator<Item = &CombatantView> {
        self.combatants.iter().filter(|c| c.alive)
    }
}

/// Persisted form of a finished battle.
///
/// Together with the formations, `seed` is enough to replay the fight.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub struct BattleRecord {
    pub battle_id: u64,
    pub kind: BattleKind,
    pub seed: Option<u64>,
    pub winner: Option<Winner>,
    pub rounds: u32,
    pub log: Vec<ActionResult>,
    pub combatants: Vec<CombatantView>,
}

impl From<BattleReport> for BattleRecord {
    fn from(report: BattleReport) -> Self {
        Self {
            battle_id: report.battle_id,
            kind: report.kind,
            seed: report.seed,
            winner: report.winner,
            rounds: report.rounds,
            log: report.log,
            combatants: report.combatants,
        }
    }
}

impl<R: BattleRng> Battle<R> {
    /// Snapshot of the battle for the caller. Usually taken once it has ended.
    pub fn report(&self) -> BattleReport {
        BattleReport {
            battle_id: self.id(),
            kind: self.kind(),
            seed: self.seed(),
            ended: self.is_ended(),
            winner: self.winner(),
            rounds: self.round(),
            log: self.log().to_vec(),
            combatants: self.combatants().map(CombatantView::from).collect(),
        }
    }
}
