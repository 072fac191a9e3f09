use super::*;
use crate::error::GameError;
use crate::formation::resolve_formation;

#[test]
fn test_roster_resolves_in_slot_order() {
    let catalog = create_catalog();
    let roster = vec![
        RosterEntry::new("frost_witch", 12, 3, 4),
        RosterEntry::new("shield_bearer", 8, 1, 0),
        RosterEntry::new("wolf_rider", 5, 2, 2),
    ];

    let specs = resolve_formation(&catalog, &roster).unwrap();

    let positions: Vec<u8> = specs.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 2, 4]);
    assert_eq!(specs[0].template.template_id, "shield_bearer");
    assert_eq!(specs[2].level, 12);
    assert_eq!(specs[2].star, 3);
}

#[test]
fn test_level_and_star_are_clamped_to_one() {
    let catalog = create_catalog();
    let specs = resolve_formation(&catalog, &[RosterEntry::new("apprentice", 0, 0, 1)]).unwrap();

    assert_eq!(specs[0].level, 1);
    assert_eq!(specs[0].star, 1);
}

#[test]
fn test_roster_errors() {
    let catalog = create_catalog();

    assert_eq!(resolve_formation(&catalog, &[]), Err(GameError::EmptyFormation));

    let six: Vec<_> = (0..6).map(|i| RosterEntry::new("goblin_scout", 1, 1, i)).collect();
    assert_eq!(resolve_formation(&catalog, &six), Err(GameError::FormationFull));

    let twins = [
        RosterEntry::new("goblin_scout", 1, 1, 3),
        RosterEntry::new("goblin_grunt", 1, 1, 3),
    ];
    assert_eq!(
        resolve_formation(&catalog, &twins),
        Err(GameError::DuplicateSlot { slot: 3 })
    );

    assert_eq!(
        resolve_formation(&catalog, &[RosterEntry::new("goblin_scout", 1, 1, 5)]),
        Err(GameError::InvalidSlot { slot: 5 })
    );

    assert_eq!(
        resolve_formation(&catalog, &[RosterEntry::new("phoenix", 1, 1, 0)]),
        Err(GameError::TemplateNotFound {
            template_id: "phoenix".to_string()
        })
    );
}

#[test]
fn test_roster_json() {
    let entry: RosterEntry =
        serde_json::from_str(r#"{ "templateId": "lich", "level": 30, "star": 5, "slot": 2 }"#).unwrap();
    assert_eq!(entry, RosterEntry::new("lich", 30, 5, 2));
}
