//! Logging utilities
//!
//! Thin helpers over the `log` facade. The engine never installs a logger;
//! the embedding service decides where these records go.

const TARGET: &str = "hero_battle";

/// Log an info message
#[inline]
pub fn info(msg: &str) {
    log::info!(target: TARGET, "{}", msg);
}

/// Log a warning message
#[inline]
pub fn warn(msg: &str) {
    log::warn!(target: TARGET, "{}", msg);
}

/// Log a debug message with a label
#[inline]
pub fn debug(label: &str, msg: &str) {
    log::debug!(target: TARGET, "[{}] {}", label, msg);
}

/// Log an action being performed
#[inline]
pub fn action(name: &str, details: &str) {
    log::debug!(target: TARGET, ">> {}: {}", name, details);
}

/// Log action result
#[inline]
pub fn result(success: bool, msg: &str) {
    if success {
        log::debug!(target: TARGET, "<< ok: {}", msg);
    } else {
        log::warn!(target: TARGET, "<< rejected: {}", msg);
    }
}

/// Log a round summary
#[inline]
pub fn round_summary(battle_id: u64, round: u32, player_alive: usize, enemy_alive: usize) {
    log::debug!(
        target: TARGET,
        "battle {} round {} done: player alive {}, enemy alive {}",
        battle_id,
        round,
        player_alive,
        enemy_alive
    );
}
