//! Hero template catalog
//!
//! Templates are content data: they are loaded once (usually from JSON) and
//! shared read-only by every battle.

use std::collections::BTreeMap;

use hero_battle::log;
use hero_battle::HeroTemplate;

use crate::error::{GameError, GameResult};

const STARTER_HEROES: &str = include_str!("../data/starter_heroes.json");

/// Highest quality tier a template may carry
pub const MAX_QUALITY: u8 = 6;

/// Hero templates keyed by template id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, HeroTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting invalid or duplicate templates
    pub fn from_templates(templates: impl IntoIterator<Item = HeroTemplate>) -> GameResult<Self> {
        let mut catalog = Self::new();
        for template in templates {
            catalog.insert(template)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of templates
    pub fn from_json(json: &str) -> GameResult<Self> {
        let templates: Vec<HeroTemplate> = serde_json::from_str(json).map_err(|e| {
            log::warn(&format!("hero catalog parse failed: {}", e));
            GameError::InvalidCatalog
        })?;
        let catalog = Self::from_templates(templates)?;
        log::info(&format!("loaded {} hero templates", catalog.len()));
        Ok(catalog)
    }

    pub fn insert(&mut self, template: HeroTemplate) -> GameResult<()> {
        validate(&template)?;
        if self.templates.contains_key(&template.template_id) {
            log::warn(&format!("duplicate hero template '{}'", template.template_id));
            return Err(GameError::InvalidCatalog);
        }
        self.templates.insert(template.template_id.clone(), template);
        Ok(())
    }

    pub fn get(&self, template_id: &str) -> GameResult<&HeroTemplate> {
        self.templates
            .get(template_id)
            .ok_or_else(|| GameError::TemplateNotFound {
                template_id: template_id.to_string(),
            })
    }

    pub fn contains(&self, template_id: &str) -> bool {
        self.templates.contains_key(template_id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates in template id order
    pub fn iter(&self) -> impl Iterator<Item = &HeroTemplate> {
        self.templates.values()
    }
}

// Skill id 0 belongs to the basic attack.
fn validate(template: &HeroTemplate) -> GameResult<()> {
    let problem = if template.template_id.is_empty() {
        Some("empty template id".to_string())
    } else if !(1..=MAX_QUALITY).contains(&template.quality) {
        Some(format!("quality {} out of range", template.quality))
    } else if template.skills.iter().any(|s| s.id == 0) {
        Some("skill id 0 is reserved".to_string())
    } else if template
        .skills
        .iter()
        .enumerate()
        .any(|(i, s)| template.skills[..i].iter().any(|o| o.id == s.id))
    {
        Some("duplicate skill id".to_string())
    } else {
        None
    };

    match problem {
        Some(reason) => {
            log::warn(&format!(
                "hero template '{}' rejected: {}",
                template.template_id, reason
            ));
            Err(GameError::InvalidCatalog)
        }
        None => Ok(()),
    }
}

/// The heroes shipped with the game. Stage enemies are drawn from these.
pub fn starter_catalog() -> GameResult<TemplateCatalog> {
    TemplateCatalog::from_json(STARTER_HEROES)
}
