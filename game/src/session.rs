//! In-memory registry of live battles
//!
//! Turn-by-turn battles outlive a single request, so they are parked here
//! between calls. Every battle sits behind its own lock: calls on different
//! battles run in parallel, calls on the same battle are serialised. Nothing
//! expires on its own; the owner calls [`BattleRegistry::sweep_idle`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::{Duration, Instant};

use hero_battle::log;
use hero_battle::{
    ActionChoice, ActionResult, Battle, BattleConfig, BattleKind, BattleReport, CombatantSpec,
    SeedMode,
};

use crate::catalog::TemplateCatalog;
use crate::error::{GameError, GameResult};
use crate::formation::{resolve_formation, RosterEntry};
use crate::opponents::{generate_stage_enemies, Difficulty};

/// Battles untouched for this long are dropped by the idle sweep
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub idle_timeout: Duration,
    /// Applied to every battle the registry starts
    pub battle: BattleConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            battle: BattleConfig::default(),
        }
    }
}

#[derive(Debug)]
struct Session {
    battle: Battle,
    last_active: Instant,
}

impl Session {
    fn touch(&mut self) -> &mut Battle {
        self.last_active = Instant::now();
        &mut self.battle
    }
}

// A panic while holding a lock leaves a battle that is still structurally
// valid, so poisoning is ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct BattleRegistry {
    catalog: Arc<TemplateCatalog>,
    config: SessionConfig,
    next_id: AtomicU64,
    battles: Mutex<HashMap<u64, Arc<Mutex<Session>>>>,
}

impl BattleRegistry {
    pub fn new(catalog: Arc<TemplateCatalog>, config: SessionConfig) -> Self {
        Self {
            catalog,
            config,
            next_id: AtomicU64::new(1),
            battles: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a PVE battle against the generated enemies of `stage`.
    ///
    /// One seed drives both enemy generation and the battle, so the recorded
    /// seed replays the whole stage.
    pub fn start_stage(
        &self,
        roster: &[RosterEntry],
        stage: u32,
        difficulty: Difficulty,
    ) -> GameResult<u64> {
        let seed = self.config.battle.seed.resolve();
        let player = resolve_formation(&self.catalog, roster)?;
        let enemy = generate_stage_enemies(&self.catalog, stage, difficulty, seed)?;
        self.start(BattleKind::Stage, &player, &enemy, seed)
    }

    /// Start a PVP battle between two player rosters
    pub fn start_pvp(&self, roster: &[RosterEntry], opponent: &[RosterEntry]) -> GameResult<u64> {
        let player = resolve_formation(&self.catalog, roster)?;
        let enemy = resolve_formation(&self.catalog, opponent)?;
        let seed = self.config.battle.seed.resolve();
        self.start(BattleKind::Pvp, &player, &enemy, seed)
    }

    fn start(
        &self,
        kind: BattleKind,
        player: &[CombatantSpec],
        enemy: &[CombatantSpec],
        seed: u64,
    ) -> GameResult<u64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let config = BattleConfig {
            seed: SeedMode::Fixed(seed),
            ..self.config.battle.clone()
        };
        let battle = Battle::new(id, kind, player, enemy, config)?;
        let session = Session {
            battle,
            last_active: Instant::now(),
        };
        lock(&self.battles).insert(id, Arc::new(Mutex::new(session)));
        log::info(&format!("session: battle {} started ({:?}, seed {})", id, kind, seed));
        Ok(id)
    }

    // The registry lock is released before the battle lock is taken.
    fn session(&self, battle_id: u64) -> GameResult<Arc<Mutex<Session>>> {
        lock(&self.battles)
            .get(&battle_id)
            .cloned()
            .ok_or(GameError::BattleNotFound { battle_id })
    }

    /// Resolve one caller-chosen action in a turn-by-turn battle
    pub fn submit_action(&self, battle_id: u64, choice: ActionChoice) -> GameResult<ActionResult> {
        let session = self.session(battle_id)?;
        let mut session = lock(&session);
        Ok(session.touch().submit_action(choice)?)
    }

    /// Close the current manual round
    pub fn advance_round(&self, battle_id: u64) -> GameResult<u32> {
        let session = self.session(battle_id)?;
        let mut session = lock(&session);
        Ok(session.touch().advance_round()?)
    }

    /// Play the battle out with the default policy and return the result.
    ///
    /// The battle stays registered until `finish` or the idle sweep drops it.
    pub fn auto_battle(&self, battle_id: u64) -> GameResult<BattleReport> {
        let session = self.session(battle_id)?;
        let mut session = lock(&session);
        Ok(session.touch().run_to_end())
    }

    /// Current state of a battle, finished or not
    pub fn report(&self, battle_id: u64) -> GameResult<BattleReport> {
        let session = self.session(battle_id)?;
        let session = lock(&session);
        Ok(session.battle.report())
    }

    /// Remove a battle and hand back its final report
    pub fn finish(&self, battle_id: u64) -> GameResult<BattleReport> {
        let session = lock(&self.battles)
            .remove(&battle_id)
            .ok_or(GameError::BattleNotFound { battle_id })?;
        let report = lock(&session).battle.report();
        log::info(&format!(
            "session: battle {} closed after {} rounds",
            battle_id, report.rounds
        ));
        Ok(report)
    }

    /// Drop every battle idle for longer than the configured timeout as of
    /// `now`. Battles locked by an in-flight call are kept.
    pub fn sweep_idle(&self, now: Instant) -> Vec<u64> {
        let timeout = self.config.idle_timeout;
        let mut battles = lock(&self.battles);
        let mut expired: Vec<u64> = battles
            .iter()
            .filter(|(_, session)| match session.try_lock() {
                Ok(s) => now.saturating_duration_since(s.last_active) > timeout,
                Err(TryLockError::Poisoned(e)) => {
                    now.saturating_duration_since(e.get_ref().last_active) > timeout
                }
                Err(TryLockError::WouldBlock) => false,
            })
            .map(|(id, _)| *id)
            .collect();
        expired.sort_unstable();

        for id in &expired {
            battles.remove(id);
        }
        if !expired.is_empty() {
            log::info(&format!("session: swept {} idle battles", expired.len()));
        }
        expired
    }

    pub fn contains(&self, battle_id: u64) -> bool {
        lock(&self.battles).contains_key(&battle_id)
    }

    pub fn len(&self) -> usize {
        lock(&self.battles).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.battles).is_empty()
    }
}
