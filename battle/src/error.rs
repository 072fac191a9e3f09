//! Error types for battle operations
//!
//! Plain enums instead of String-based errors so results can be
//! SCALE-encoded alongside the battle record.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::limits::Team;

/// Errors that can occur while setting up or resolving a battle
#[derive(
    Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize, thiserror::Error,
)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleError {
    /// Attacker or target is unknown, dead, or on the wrong side
    #[error("invalid target")]
    InvalidTarget,
    /// The battle has already reached its terminal state
    #[error("battle already ended")]
    BattleEnded,
    /// A side was created without any combatant
    #[error("{team} team has no combatants")]
    EmptyTeam { team: Team },
    /// A side has more combatants than formation slots
    #[error("{team} formation is full")]
    FormationFull { team: Team },
    /// Two combatants of one side claim the same slot
    #[error("{team} formation slot {position} is taken twice")]
    DuplicatePosition { team: Team, position: u8 },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, BattleError>;
