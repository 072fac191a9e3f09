//! Game-side glue around the hero battle engine.
//!
//! Loads hero templates, turns player rosters and stage numbers into
//! formations, and keeps live battles in a registry between turn-by-turn
//! calls.

pub mod catalog;
pub mod error;
pub mod formation;
pub mod opponents;
pub mod session;

#[cfg(test)]
mod tests;

pub use catalog::{starter_catalog, TemplateCatalog};
pub use error::*;
pub use formation::{resolve_formation, RosterEntry};
pub use opponents::{generate_stage_enemies, Archetype, Difficulty};
pub use session::{BattleRegistry, SessionConfig};
