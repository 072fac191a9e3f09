mod formation;

use std::sync::Arc;

use hero_battle::BattleConfig;

use crate::catalog::{starter_catalog, TemplateCatalog};
use crate::formation::RosterEntry;
use crate::session::{BattleRegistry, SessionConfig};

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn create_catalog() -> TemplateCatalog {
    starter_catalog().expect("starter heroes should parse")
}

/// Roster filling slots 0.. with the given templates at level 10, star 2
fn create_roster(template_ids: &[&str]) -> Vec<RosterEntry> {
    template_ids
        .iter()
        .enumerate()
        .map(|(slot, id)| RosterEntry::new(id, 10, 2, slot as u8))
        .collect()
}

fn create_registry(config: SessionConfig) -> BattleRegistry {
    BattleRegistry::new(Arc::new(create_catalog()), config)
}

fn seeded_registry(seed: u64) -> BattleRegistry {
    create_registry(SessionConfig {
        battle: BattleConfig::seeded(seed),
        ..SessionConfig::default()
    })
}
