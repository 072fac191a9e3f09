//! Error types for catalog, formation and session operations

use hero_battle::BattleError;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Errors raised around a battle, before or between engine calls
#[derive(
    Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize, thiserror::Error,
)]
#[serde(tag = "type", content = "details", rename_all = "camelCase")]
pub enum GameError {
    /// Hero template not in the catalog
    #[error("hero template '{template_id}' not found")]
    TemplateNotFound { template_id: String },
    /// More heroes than formation slots
    #[error("formation is full")]
    FormationFull,
    /// Two heroes assigned to the same slot
    #[error("slot {slot} is used twice")]
    DuplicateSlot { slot: u8 },
    /// Slot index outside the formation
    #[error("slot {slot} is outside the formation")]
    InvalidSlot { slot: u8 },
    /// A formation needs at least one hero
    #[error("formation is empty")]
    EmptyFormation,
    /// No live battle with this id
    #[error("battle {battle_id} not found")]
    BattleNotFound { battle_id: u64 },
    /// Catalog data could not be parsed or is inconsistent
    #[error("invalid hero catalog")]
    InvalidCatalog,
    /// Rejected by the battle engine
    #[error("battle error: {0}")]
    Battle(#[from] BattleError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
