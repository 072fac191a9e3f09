//! Turn-based battle engine for collectible hero teams.
//!
//! Two formations of heroes are turned into combatants (`stats`), ordered by
//! speed every round (`scheduler`), and trade attacks and skills
//! (`resolver`) until one side is wiped out or the round cap forces a draw
//! (`lifecycle`). All randomness comes from one seedable rng per battle, so a
//! recorded seed replays the same log.

pub mod action;
pub mod combatant;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod limits;
pub mod log;
pub mod resolver;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use action::*;
pub use combatant::{Buff, Combatant};
pub use config::*;
pub use error::*;
pub use lifecycle::{ActionPolicy, AutoPolicy, RoundSummary};
pub use limits::*;
pub use resolver::{compute_damage, execute_attack, mitigation_factor, DamageRoll};
pub use rng::{BattleRng, XorShiftRng};
pub use scheduler::order_actors;
pub use state::*;
pub use stats::{compute_stats, CombatantStats};
pub use types::*;
pub use view::*;
