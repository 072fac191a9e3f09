//! Battle lifecycle: Created -> Active -> Ended
//!
//! `Battle::new` covers creation and leaves the battle active at round 0.
//! Rounds are then driven either automatically (`play_round`, `run_to_end`)
//! or one caller-chosen action at a time (`submit_action`).

use serde::{Deserialize, Serialize};

use crate::action::{ActionChoice, ActionResult};
use crate::error::{BattleError, EngineResult};
use crate::limits::Team;
use crate::log;
use crate::resolver::execute_attack;
use crate::rng::BattleRng;
use crate::scheduler::order_actors;
use crate::state::{Battle, Winner};
use crate::types::CombatantId;
use crate::view::BattleReport;

/// Chooses what a combatant does when its turn comes up in an automatic round
pub trait ActionPolicy {
    /// `None` makes the actor pass its turn.
    fn choose<R: BattleRng>(&mut self, battle: &Battle<R>, actor: CombatantId) -> Option<ActionChoice>;
}

/// Default behaviour: first ready skill (else a basic attack) against the
/// living opponent in the lowest formation slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPolicy;

impl ActionPolicy for AutoPolicy {
    fn choose<R: BattleRng>(&mut self, battle: &Battle<R>, actor: CombatantId) -> Option<ActionChoice> {
        let combatant = battle.combatant(actor)?;
        let target = battle
            .team(actor.team.opponent())
            .iter()
            .filter(|c| c.is_alive())
            .min_by_key(|c| c.position())?;
        Some(ActionChoice {
            actor,
            target: target.id,
            skill: combatant.first_ready_skill(battle.round()).map(|s| s.id),
        })
    }
}

/// What happened in one automatic round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round: u32,
    /// Actions that reached the log this round
    pub actions: u32,
    /// Actions rejected by the resolver
    pub rejected: u32,
    pub ended: bool,
    pub winner: Option<Winner>,
}

impl<R: BattleRng> Battle<R> {
    /// Resolve a single caller-chosen action and check for the end of the battle.
    ///
    /// This is the entry point for battles driven turn by turn from outside.
    pub fn submit_action(&mut self, choice: ActionChoice) -> EngineResult<ActionResult> {
        if self.is_ended() {
            log::result(false, &format!("battle {} already ended", self.id()));
            return Err(BattleError::BattleEnded);
        }
        if self.round == 0 {
            self.round = 1;
        }
        let result = execute_attack(self, choice.actor, choice.target, choice.skill)?;
        self.update_termination();
        Ok(result)
    }

    /// Close the current manual round and open the next one.
    ///
    /// Applies the round cap the same way automatic rounds do.
    pub fn advance_round(&mut self) -> EngineResult<u32> {
        if self.is_ended() {
            return Err(BattleError::BattleEnded);
        }
        if self.round > 0 && self.limits.record_round(self.round) {
            self.finish(Winner::Draw);
            return Ok(self.round);
        }
        self.round += 1;
        self.upkeep();
        Ok(self.round)
    }

    /// Play one full round with the default policy
    pub fn play_round(&mut self) -> EngineResult<RoundSummary> {
        self.play_round_with(&mut AutoPolicy)
    }

    /// Play one full round, asking `policy` for every actor's action.
    ///
    /// The action order is fixed when the round starts. Combatants killed
    /// earlier in the round are skipped. Rejected actions are logged and the
    /// round moves on to the next actor.
    pub fn play_round_with<P: ActionPolicy>(&mut self, policy: &mut P) -> EngineResult<RoundSummary> {
        if self.is_ended() {
            return Err(BattleError::BattleEnded);
        }
        self.round += 1;
        self.upkeep();

        let order = order_actors(self);
        let mut actions = 0;
        let mut rejected = 0;

        for actor in order {
            if !self.combatant(actor).map_or(false, |c| c.is_alive()) {
                continue;
            }
            let Some(choice) = policy.choose(self, actor) else {
                continue;
            };
            if choice.actor != actor {
                log::warn(&format!(
                    "policy picked {} on {}'s turn, skipping",
                    choice.actor, actor
                ));
                rejected += 1;
                continue;
            }
            match execute_attack(self, choice.actor, choice.target, choice.skill) {
                Ok(_) => actions += 1,
                Err(e) => {
                    log::warn(&format!("round {}: {} could not act: {}", self.round, actor, e));
                    rejected += 1;
                }
            }
            if self.update_termination() {
                break;
            }
        }

        if !self.is_ended() && self.limits.record_round(self.round) {
            self.finish(Winner::Draw);
        }

        log::round_summary(
            self.id(),
            self.round,
            self.living_count(Team::Player),
            self.living_count(Team::Enemy),
        );

        Ok(RoundSummary {
            round: self.round,
            actions,
            rejected,
            ended: self.is_ended(),
            winner: self.winner(),
        })
    }

    /// Auto-battle with the default policy until the battle ends
    pub fn run_to_end(&mut self) -> BattleReport {
        self.run_to_end_with(&mut AutoPolicy)
    }

    /// Auto-battle until the battle ends. The round cap guarantees termination.
    pub fn run_to_end_with<P: ActionPolicy>(&mut self, policy: &mut P) -> BattleReport {
        while !self.is_ended() {
            if self.play_round_with(policy).is_err() {
                break;
            }
        }
        self.report()
    }

    // Expire buffs from earlier rounds; cooldowns are round-stamped and need no ticking.
    fn upkeep(&mut self) {
        let round = self.round;
        for combatant in self.combatants_mut() {
            combatant.prune_buffs(round);
        }
    }
}
