use std::collections::HashMap;

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::action::ActionResult;
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::error::{BattleError, EngineResult};
use crate::limits::{BattleLimits, Team, MAX_FORMATION_SIZE};
use crate::log;
use crate::rng::{BattleRng, XorShiftRng};
use crate::types::{BattleKind, CombatantId, CombatantSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattlePhase {
    Active,
    Ended,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Winner {
    Player,
    Enemy,
    Draw,
}

/// Outcome of a termination check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleEnd {
    pub ended: bool,
    pub winner: Option<Winner>,
}

/// All mutable data of one battle.
///
/// A battle is self-contained: nothing is shared between instances, and the
/// caller must not resolve actions on the same battle from two threads.
#[derive(Debug, Clone)]
pub struct Battle<R: BattleRng = XorShiftRng> {
    id: u64,
    kind: BattleKind,
    player: Vec<Combatant>,
    enemy: Vec<Combatant>,
    /// Combatant id -> index in its team vector
    index: HashMap<CombatantId, usize>,
    pub(crate) round: u32,
    phase: BattlePhase,
    winner: Option<Winner>,
    log: Vec<ActionResult>,
    pub(crate) rng: R,
    seed: Option<u64>,
    config: BattleConfig,
    pub(crate) limits: BattleLimits,
}

fn build_team(team: Team, specs: &[CombatantSpec]) -> Vec<Combatant> {
    specs.iter().map(|spec| Combatant::from_spec(team, spec)).collect()
}

fn validate_team(team: Team, combatants: &[Combatant]) -> EngineResult<()> {
    if combatants.is_empty() {
        return Err(BattleError::EmptyTeam { team });
    }
    if combatants.len() > MAX_FORMATION_SIZE {
        return Err(BattleError::FormationFull { team });
    }
    for (i, c) in combatants.iter().enumerate() {
        if combatants[..i].iter().any(|other| other.position() == c.position()) {
            return Err(BattleError::DuplicatePosition {
                team,
                position: c.position(),
            });
        }
    }
    Ok(())
}

impl Battle<XorShiftRng> {
    /// Start a battle, deriving every combatant's stats from its spec.
    ///
    /// The rng is seeded from `config.seed`; the resolved seed is kept on the
    /// battle so the fight can be replayed.
    pub fn new(
        id: u64,
        kind: BattleKind,
        player: &[CombatantSpec],
        enemy: &[CombatantSpec],
        config: BattleConfig,
    ) -> EngineResult<Self> {
        let seed = config.seed.resolve();
        let mut battle = Self::from_combatants(
            id,
            kind,
            build_team(Team::Player, player),
            build_team(Team::Enemy, enemy),
            config,
            XorShiftRng::seed_from_u64(seed),
        )?;
        battle.seed = Some(seed);
        Ok(battle)
    }
}

impl<R: BattleRng> Battle<R> {
    /// Start a battle with an injected rng
    pub fn with_rng(
        id: u64,
        kind: BattleKind,
        player: &[CombatantSpec],
        enemy: &[CombatantSpec],
        config: BattleConfig,
        rng: R,
    ) -> EngineResult<Self> {
        Self::from_combatants(
            id,
            kind,
            build_team(Team::Player, player),
            build_team(Team::Enemy, enemy),
            config,
            rng,
        )
    }

    /// Start a battle from already-built combatants.
    ///
    /// Each combatant is moved to the side named by its id.
    pub fn from_combatants(
        id: u64,
        kind: BattleKind,
        player: Vec<Combatant>,
        enemy: Vec<Combatant>,
        config: BattleConfig,
        rng: R,
    ) -> EngineResult<Self> {
        let (player, enemy): (Vec<_>, Vec<_>) = player
            .into_iter()
            .chain(enemy)
            .partition(|c| c.team() == Team::Player);
        validate_team(Team::Player, &player)?;
        validate_team(Team::Enemy, &enemy)?;

        let index = player
            .iter()
            .enumerate()
            .chain(enemy.iter().enumerate())
            .map(|(i, c)| (c.id, i))
            .collect();

        let limits = BattleLimits::new(config.max_rounds);
        let mut battle = Self {
            id,
            kind,
            player,
            enemy,
            index,
            round: 0,
            phase: BattlePhase::Active,
            winner: None,
            log: Vec::new(),
            rng,
            seed: None,
            config,
            limits,
        };

        log::info(&format!(
            "battle {} created ({:?}): {} vs {}",
            id,
            kind,
            battle.player.len(),
            battle.enemy.len()
        ));

        // A side fielding only zero-hp combatants loses before round one.
        battle.update_termination();
        Ok(battle)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> BattleKind {
        self.kind
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == BattlePhase::Ended
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn log(&self) -> &[ActionResult] {
        &self.log
    }

    /// Seed the rng was created from, if the battle seeded it itself
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn team(&self, team: Team) -> &[Combatant] {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }

    /// Both teams, player side first
    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.player.iter().chain(self.enemy.iter())
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        let idx = *self.index.get(&id)?;
        self.team(id.team).get(idx)
    }

    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        let idx = *self.index.get(&id)?;
        match id.team {
            Team::Player => self.player.get_mut(idx),
            Team::Enemy => self.enemy.get_mut(idx),
        }
    }

    pub(crate) fn combatants_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.player.iter_mut().chain(self.enemy.iter_mut())
    }

    pub fn living_count(&self, team: Team) -> usize {
        self.team(team).iter().filter(|c| c.is_alive()).count()
    }

    pub(crate) fn next_timestamp(&self) -> u64 {
        self.log.len() as u64
    }

    pub(crate) fn push_log(&mut self, entry: ActionResult) {
        self.log.push(entry);
    }

    /// Move to the terminal state. Later calls are ignored.
    pub(crate) fn finish(&mut self, winner: Winner) {
        if self.is_ended() {
            return;
        }
        self.phase = BattlePhase::Ended;
        self.winner = Some(winner);
        log::info(&format!(
            "battle {} ended after round {}: {:?}",
            self.id, self.round, winner
        ));
    }

    /// Run the termination check and end the battle if a side is wiped out.
    pub(crate) fn update_termination(&mut self) -> bool {
        if self.is_ended() {
            return true;
        }
        let end = check_battle_end(self);
        if let Some(winner) = end.winner {
            self.finish(winner);
        }
        end.ended
    }
}

/// Decide whether the battle is over and who won.
///
/// Must run after every single action so that at most one side can have
/// been emptied since the previous check.
pub fn check_battle_end<R: BattleRng>(battle: &Battle<R>) -> BattleEnd {
    if battle.is_ended() {
        return BattleEnd {
            ended: true,
            winner: battle.winner(),
        };
    }
    let player_alive = battle.team(Team::Player).iter().any(|c| c.is_alive());
    let enemy_alive = battle.team(Team::Enemy).iter().any(|c| c.is_alive());

    let winner = if !player_alive {
        Some(Winner::Enemy)
    } else if !enemy_alive {
        Some(Winner::Player)
    } else {
        None
    };

    BattleEnd {
        ended: winner.is_some(),
        winner,
    }
}
