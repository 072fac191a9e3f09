use serde::{Deserialize, Serialize};

use crate::limits::DEFAULT_MAX_ROUNDS;
use crate::rng::entropy_seed;

/// Where a battle's random seed comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "seed", rename_all = "camelCase")]
pub enum SeedMode {
    /// Reproducible: the same seed and inputs replay the same battle
    Fixed(u64),
    /// Fresh seed from the OS for every battle (still recorded for replay)
    #[default]
    Entropy,
}

impl SeedMode {
    pub fn resolve(self) -> u64 {
        match self {
            SeedMode::Fixed(seed) => seed,
            SeedMode::Entropy => entropy_seed(),
        }
    }
}

/// How combatants with equal speed are ordered within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreak {
    /// Reshuffled every round from the battle rng
    #[default]
    Random,
    /// Player side first, then lower formation slot first
    Formation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleConfig {
    pub seed: SeedMode,
    pub tie_break: TieBreak,
    /// Rounds after which an undecided battle ends in a draw
    pub max_rounds: u32,
}

impl BattleConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: SeedMode::Fixed(seed),
            ..Self::default()
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: SeedMode::Entropy,
            tie_break: TieBreak::Random,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}
