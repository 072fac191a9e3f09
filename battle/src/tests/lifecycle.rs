use super::*;
use crate::action::{ActionChoice, ActionKind};
use crate::error::BattleError;
use crate::lifecycle::{ActionPolicy, AutoPolicy};
use crate::limits::Team;
use crate::state::Winner;

fn squad() -> (Vec<CombatantSpec>, Vec<CombatantSpec>) {
    let player = vec![
        create_spec("Knight", 900, 120, 90, 100, 0),
        create_spec("Archer", 600, 160, 40, 130, 1),
        create_spec("Cleric", 700, 80, 60, 110, 2),
    ];
    let enemy = vec![
        create_spec("Orc", 1000, 110, 80, 90, 0),
        create_spec("Goblin", 500, 140, 30, 140, 1),
        create_spec("Shaman", 650, 100, 50, 105, 3),
    ];
    (player, enemy)
}

/// Always aims at the actor's own side
struct FriendlyFire;

impl ActionPolicy for FriendlyFire {
    fn choose<R: BattleRng>(&mut self, battle: &Battle<R>, actor: CombatantId) -> Option<ActionChoice> {
        let ally = battle.team(actor.team).iter().find(|c| c.id != actor)?;
        Some(ActionChoice::attack(actor, ally.id))
    }
}

/// Answers every turn on behalf of someone else
struct Impostor;

impl ActionPolicy for Impostor {
    fn choose<R: BattleRng>(&mut self, _battle: &Battle<R>, actor: CombatantId) -> Option<ActionChoice> {
        let other = CombatantId {
            team: actor.team,
            position: actor.position + 1,
        };
        Some(ActionChoice::attack(other, CombatantId::enemy(0)))
    }
}

#[test]
fn test_run_to_end_produces_a_winner() {
    let (player, enemy) = squad();
    let mut battle = seeded_battle(&player, &enemy, 2024);
    let report = battle.run_to_end();

    assert!(report.ended);
    assert!(matches!(report.winner, Some(Winner::Player) | Some(Winner::Enemy)));
    assert!(report.rounds >= 1);
    assert!(!report.log.is_empty());
    assert_eq!(report.seed, Some(2024));
    assert_eq!(report.battle_id, 7);

    let losers = match report.winner {
        Some(Winner::Player) => Team::Enemy,
        _ => Team::Player,
    };
    assert_eq!(battle.living_count(losers), 0);
    assert!(battle.living_count(losers.opponent()) > 0);
}

#[test]
fn test_same_seed_replays_the_same_battle() {
    let (player, enemy) = squad();
    let first = seeded_battle(&player, &enemy, 31337).run_to_end();
    let second = seeded_battle(&player, &enemy, 31337).run_to_end();

    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_diverge() {
    let (player, enemy) = squad();
    let logs: Vec<_> = (0..5)
        .map(|seed| seeded_battle(&player, &enemy, seed).run_to_end().log)
        .collect();

    assert!(logs.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_round_cap_ends_in_a_draw() {
    let player = vec![fighter(CombatantId::player(0), "Turtle", 10_000, 0, 0, 10)];
    let mut battle = Battle::from_combatants(
        1,
        BattleKind::Pvp,
        player,
        vec![create_sandbag(0)],
        formation_config().with_max_rounds(5),
        ScriptedRng::always(0.5),
    )
    .unwrap();

    let report = battle.run_to_end();

    assert_eq!(report.winner, Some(Winner::Draw));
    assert_eq!(report.rounds, 5);
    assert_eq!(report.log.len(), 10);
    assert!(report.log.iter().all(|e| e.damage == 1));
    assert_eq!(battle.living_count(Team::Player), 1);
    assert_eq!(battle.living_count(Team::Enemy), 1);
}

#[test]
fn test_default_round_cap_is_100() {
    let player = vec![fighter(CombatantId::player(0), "Turtle", 1_000_000, 0, 0, 10)];
    let enemy = vec![fighter(CombatantId::enemy(0), "Shell", 1_000_000, 0, 0, 10)];
    let mut battle = Battle::from_combatants(
        1,
        BattleKind::Pvp,
        player,
        enemy,
        BattleConfig::seeded(3),
        XorShiftRng::seed_from_u64(3),
    )
    .unwrap();

    let report = battle.run_to_end();
    assert_eq!(report.winner, Some(Winner::Draw));
    assert_eq!(report.rounds, 100);
}

#[test]
fn test_combatant_killed_mid_round_does_not_act() {
    let player = vec![fighter(CombatantId::player(0), "Assassin", 1000, 10_000, 0, 200)];
    let enemy = vec![
        fighter(CombatantId::enemy(0), "Victim", 100, 50, 0, 100),
        fighter(CombatantId::enemy(1), "Survivor", 5000, 50, 0, 50),
    ];
    let mut battle = scripted_battle(player, enemy, ScriptedRng::always(0.5));

    let summary = battle.play_round().unwrap();

    assert_eq!(summary.round, 1);
    assert_eq!(summary.actions, 2);
    assert_eq!(summary.rejected, 0);
    assert!(!summary.ended);

    let actors: Vec<_> = battle.log().iter().map(|e| e.actor_id).collect();
    assert_eq!(actors, vec![CombatantId::player(0), CombatantId::enemy(1)]);
    assert!(battle.log()[0].is_kill);
}

#[test]
fn test_battle_stops_mid_round_once_decided() {
    let player = vec![fighter(CombatantId::player(0), "Assassin", 1000, 10_000, 0, 200)];
    let enemy = vec![fighter(CombatantId::enemy(0), "Victim", 100, 50, 0, 100)];
    let mut battle = scripted_battle(player, enemy, ScriptedRng::always(0.5));

    let summary = battle.play_round().unwrap();

    assert!(summary.ended);
    assert_eq!(summary.winner, Some(Winner::Player));
    assert_eq!(summary.actions, 1);
    assert_eq!(battle.log().len(), 1);
}

#[test]
fn test_rejected_choices_do_not_stop_the_round() {
    let player = vec![
        fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100),
        fighter(CombatantId::player(1), "Squire", 500, 50, 10, 90),
    ];
    let enemy = vec![
        fighter(CombatantId::enemy(0), "Orc", 500, 50, 10, 80),
        fighter(CombatantId::enemy(1), "Goblin", 500, 50, 10, 70),
    ];
    let mut battle = scripted_battle(player, enemy, ScriptedRng::always(0.5));

    let summary = battle.play_round_with(&mut FriendlyFire).unwrap();

    assert_eq!(summary.actions, 0);
    assert_eq!(summary.rejected, 4);
    assert!(battle.log().is_empty());
    assert!(battle.combatants().all(|c| c.current_hp == 500));
    assert_eq!(battle.round(), 1);
}

#[test]
fn test_policy_cannot_act_for_another_combatant() {
    let player = vec![
        fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100),
        fighter(CombatantId::player(1), "Squire", 500, 50, 10, 90),
    ];
    let mut battle = scripted_battle(player, vec![create_sandbag(0)], ScriptedRng::always(0.5));

    let summary = battle.play_round_with(&mut Impostor).unwrap();

    assert_eq!(summary.actions, 0);
    assert_eq!(summary.rejected, 3);
    assert!(battle.log().is_empty());
}

#[test]
fn test_manual_rounds() {
    let player = vec![fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100)];
    let mut battle = Battle::from_combatants(
        1,
        BattleKind::Pvp,
        player,
        vec![create_sandbag(0)],
        formation_config().with_max_rounds(2),
        ScriptedRng::always(0.5),
    )
    .unwrap();
    let hit = ActionChoice::attack(CombatantId::player(0), CombatantId::enemy(0));

    assert_eq!(battle.round(), 0);
    let first = battle.submit_action(hit).unwrap();
    assert_eq!(first.round, 1);
    assert_eq!(first.kind, ActionKind::Attack);

    // Several actions may share a round
    battle.submit_action(hit).unwrap();
    assert_eq!(battle.round(), 1);

    assert_eq!(battle.advance_round(), Ok(2));
    assert_eq!(battle.submit_action(hit).unwrap().round, 2);

    // Closing the last allowed round is a draw
    assert_eq!(battle.advance_round(), Ok(2));
    assert!(battle.is_ended());
    assert_eq!(battle.winner(), Some(Winner::Draw));
    assert_eq!(battle.submit_action(hit), Err(BattleError::BattleEnded));
}

#[test]
fn test_invalid_manual_action_leaves_battle_untouched() {
    let player = vec![fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100)];
    let mut battle = scripted_battle(player, vec![create_sandbag(0)], ScriptedRng::always(0.5));

    let err = battle.submit_action(ActionChoice::attack(CombatantId::player(0), CombatantId::enemy(2)));
    assert_eq!(err, Err(BattleError::InvalidTarget));
    assert!(battle.log().is_empty());
    assert!(!battle.is_ended());
}

#[test]
fn test_auto_policy_targets_lowest_living_slot() {
    let player = vec![fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100)];
    let enemy = vec![
        fighter(CombatantId::enemy(4), "Rear", 100, 10, 10, 10),
        fighter(CombatantId::enemy(1), "Front", 100, 10, 10, 10),
        fighter(CombatantId::enemy(3), "Middle", 100, 10, 10, 10),
    ];
    let mut battle = scripted_battle(player, enemy, ScriptedRng::always(0.5));

    let choice = AutoPolicy.choose(&battle, CombatantId::player(0)).unwrap();
    assert_eq!(choice.target, CombatantId::enemy(1));
    assert_eq!(choice.skill, None);

    battle.combatant_mut(CombatantId::enemy(1)).unwrap().take_damage(100);
    let choice = AutoPolicy.choose(&battle, CombatantId::player(0)).unwrap();
    assert_eq!(choice.target, CombatantId::enemy(3));
}

#[test]
fn test_auto_policy_uses_ready_skills_first() {
    let slam = Skill::new(5, "Slam", 1.8, SkillKind::Physical).with_cooldown(2);
    let mut knight = fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100);
    knight.skills.push(slam.clone());
    let mut battle = scripted_battle(vec![knight], vec![create_sandbag(0)], ScriptedRng::always(0.5));

    let choice = AutoPolicy.choose(&battle, CombatantId::player(0)).unwrap();
    assert_eq!(choice.skill, Some(5));

    battle
        .combatant_mut(CombatantId::player(0))
        .unwrap()
        .start_cooldown(&slam, 1);
    battle.round = 2;
    assert_eq!(AutoPolicy.choose(&battle, CombatantId::player(0)).unwrap().skill, None);

    battle.round = 4;
    assert_eq!(AutoPolicy.choose(&battle, CombatantId::player(0)).unwrap().skill, Some(5));
}

#[test]
fn test_auto_battle_uses_skills_on_their_cooldown() {
    let slam = Skill::new(5, "Slam", 1.8, SkillKind::Physical).with_cooldown(1);
    let mut knight = fighter(CombatantId::player(0), "Knight", 500, 50, 10, 100);
    knight.skills.push(slam);
    let mut battle = Battle::from_combatants(
        1,
        BattleKind::Stage,
        vec![knight],
        vec![create_sandbag(0)],
        formation_config().with_max_rounds(4),
        ScriptedRng::always(0.5),
    )
    .unwrap();

    battle.run_to_end();

    let kinds: Vec<_> = battle
        .log()
        .iter()
        .filter(|e| e.actor_id == CombatantId::player(0))
        .map(|e| e.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![ActionKind::Skill, ActionKind::Attack, ActionKind::Skill, ActionKind::Attack]
    );
}
