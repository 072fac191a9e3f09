//! Team sides and the hard limits that keep every battle finite

use core::fmt;

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Number of formation slots per side
pub const MAX_FORMATION_SIZE: usize = 5;
/// Energy cap for every combatant
pub const MAX_ENERGY: u32 = 100;
/// Energy gained by the attacker on a confirmed hit
pub const ATTACKER_ENERGY_GAIN: u32 = 20;
/// Energy gained by the target on a confirmed hit
pub const TARGET_ENERGY_GAIN: u32 = 10;
/// Rounds played before an undecided battle is called a draw
pub const DEFAULT_MAX_ROUNDS: u32 = 100;

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
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Player => f.write_str("PLAYER"),
            Team::Enemy => f.write_str("ENEMY"),
        }
    }
}

/// Tracks the round cap of a single battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleLimits {
    pub max_rounds: u32,
    pub limit_reached_at: Option<u32>,
}

impl BattleLimits {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            max_rounds,
            limit_reached_at: None,
        }
    }

    /// Record that `round` finished; returns `true` once the cap is hit.
    pub fn record_round(&mut self, round: u32) -> bool {
        if round >= self.max_rounds {
            self.limit_reached_at = Some(round);
            return true;
        }
        false
    }

    pub fn is_exceeded(&self) -> bool {
        self.limit_reached_at.is_some()
    }
}

impl Default for BattleLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}
