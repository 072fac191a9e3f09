//! Player rosters to engine formations

use hero_battle::log;
use hero_battle::{CombatantSpec, MAX_FORMATION_SIZE};
use serde::{Deserialize, Serialize};

use crate::catalog::TemplateCatalog;
use crate::error::{GameError, GameResult};

/// One hero a player puts into a formation slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub template_id: String,
    pub level: u32,
    pub star: u32,
    pub slot: u8,
}

impl RosterEntry {
    pub fn new(template_id: &str, level: u32, star: u32, slot: u8) -> Self {
        Self {
            template_id: template_id.to_string(),
            level,
            star,
            slot,
        }
    }
}

/// Look up every roster entry in `catalog` and build the engine's specs,
/// ordered by slot.
///
/// Level and star below 1 are raised to 1.
pub fn resolve_formation(
    catalog: &TemplateCatalog,
    roster: &[RosterEntry],
) -> GameResult<Vec<CombatantSpec>> {
    if roster.is_empty() {
        return Err(GameError::EmptyFormation);
    }
    if roster.len() > MAX_FORMATION_SIZE {
        return Err(GameError::FormationFull);
    }

    let mut specs: Vec<CombatantSpec> = Vec::with_capacity(roster.len());
    for entry in roster {
        if entry.slot as usize >= MAX_FORMATION_SIZE {
            return Err(GameError::InvalidSlot { slot: entry.slot });
        }
        if specs.iter().any(|s| s.position == entry.slot) {
            return Err(GameError::DuplicateSlot { slot: entry.slot });
        }
        let template = catalog.get(&entry.template_id)?;
        if entry.level == 0 || entry.star == 0 {
            log::debug(
                "formation",
                &format!("clamping '{}' level/star to 1", entry.template_id),
            );
        }
        specs.push(CombatantSpec::new(
            template.clone(),
            entry.level.max(1),
            entry.star.max(1),
            entry.slot,
        ));
    }

    specs.sort_by_key(|s| s.position);
    Ok(specs)
}
