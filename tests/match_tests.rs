//! Turn resolver integration tests.
//!
//! These tests drive whole matches: turn order, skipping the dead,
//! deaths from effects, elimination and the decision-provider loop.

use turn_arena::{
    Action, ActionError, ActionOutcome, CharacterClass, DecisionProvider, Effect, GameRng, Match,
    MatchConfig, MatchPhase, MatchResult, PlayerId, Roster, ScriptedRolls, TickReport, TurnStep,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn expect_actor_is(game: &mut Match<ScriptedRolls>, expected: PlayerId) {
    match game.next_turn() {
        TurnStep::AwaitingAction { actor, .. } => assert_eq!(actor, expected),
        other => panic!("expected {expected} to act, got {other:?}"),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Attacks the first living opponent; never fails validation.
fn attack_first(roster: &Roster, actor: PlayerId) -> Action {
    match roster.alive_targets(actor).first() {
        Some(&target) => Action::attack(target),
        None => Action::Pass,
    }
}

/// Plays a fixed script, counting refusals and observed turns.
#[derive(Default)]
struct Scripted {
    actions: Vec<Action>,
    next: usize,
    rejections: Vec<ActionError>,
    turns: Vec<(PlayerId, usize)>,
    resolved: Vec<ActionOutcome>,
}

impl Scripted {
    fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }
}

impl DecisionProvider for Scripted {
    fn decide(&mut self, _roster: &Roster, _actor: PlayerId) -> Action {
        let action = self.actions.get(self.next).copied().unwrap_or(Action::Pass);
        self.next += 1;
        action
    }

    fn rejected(&mut self, _actor: PlayerId, _action: &Action, error: &ActionError) {
        self.rejections.push(error.clone());
    }

    fn turn_started(&mut self, _roster: &Roster, actor: PlayerId, ticks: &[TickReport]) {
        self.turns.push((actor, ticks.len()));
    }

    fn resolved(&mut self, _roster: &Roster, _actor: PlayerId, outcome: &ActionOutcome) {
        self.resolved.push(outcome.clone());
    }
}

// =============================================================================
// Elimination
// =============================================================================

/// A kill ends a two-player match at once, mid-round.
#[test]
fn test_elimination_mid_round() {
    init_tracing();
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Rogue, "Ana")
        .player(CharacterClass::Wizard, "Cy")
        .build_with_rng(rolls)
        .unwrap();

    assert!(matches!(game.next_turn(), TurnStep::AwaitingAction { actor: P0, .. }));
    // 75 damage against 70 health
    game.choose_action(Action::ability_on(0, P1)).unwrap();

    assert_eq!(game.result(), Some(MatchResult::Elimination { winner: P0 }));
    assert_eq!(game.phase(), MatchPhase::MatchOver);
    assert_eq!(game.next_turn(), TurnStep::Over(MatchResult::Elimination { winner: P0 }));
    assert_eq!(game.choose_action(Action::Pass), Err(ActionError::NoTurnInProgress));
    assert_eq!(game.round(), 1);
}

/// Elimination wins pre-empt the round limit even on the last round.
#[test]
fn test_elimination_on_final_round() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P1, P0]);
    let mut game = Match::builder(MatchConfig::default().with_max_rounds(1))
        .player(CharacterClass::Tank, "Bo")
        .player(CharacterClass::Wizard, "Cy")
        .build_with_rng(rolls)
        .unwrap();
    game.character_mut(P0).unwrap().set_health(30);

    let result = game.run(&mut Scripted::new(vec![Action::ability_on(0, P0)]));

    assert_eq!(result, MatchResult::Elimination { winner: P1 });
}

/// Three players: one death does not end the match, the second does.
#[test]
fn test_three_player_elimination() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1, P2]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Rogue, "Ana")
        .player(CharacterClass::Wizard, "Cy")
        .player(CharacterClass::Wizard, "Ed")
        .build_with_rng(rolls)
        .unwrap();

    game.next_turn();
    game.choose_action(Action::ability_on(0, P1)).unwrap();
    assert!(!game.is_over());
    assert_eq!(game.alive_targets(P0), vec![P2]);

    game.character_mut(P0).unwrap().set_health(40);

    // Cy is dead and skipped: Ed is next
    assert!(matches!(game.next_turn(), TurnStep::AwaitingAction { actor: P2, .. }));
    assert!(matches!(
        game.choose_action(Action::attack(P1)),
        Err(ActionError::InvalidSelection { .. })
    ));
    game.choose_action(Action::ability_on(0, P0)).unwrap();

    assert!(game.is_over());
    assert_eq!(game.result(), Some(MatchResult::Elimination { winner: P2 }));
}

// =============================================================================
// Effects during turn flow
// =============================================================================

/// An actor killed by its own effects loses its action; the match goes on.
#[test]
fn test_death_from_effects_skips_action() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1, P2]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Wizard, "Cy")
        .player(CharacterClass::Rogue, "Ana")
        .player(CharacterClass::Paladin, "Di")
        .build_with_rng(rolls)
        .unwrap();

    game.next_turn();
    game.choose_action(Action::ability_on(1, P1)).unwrap();
    game.character_mut(P1).unwrap().set_health(7);

    match game.next_turn() {
        TurnStep::ActorFell { actor, ticks } => {
            assert_eq!(actor, P1);
            assert_eq!(ticks.len(), 1);
        }
        other => panic!("expected Ana to fall, got {other:?}"),
    }
    assert!(!game.is_over());
    assert!(matches!(game.next_turn(), TurnStep::AwaitingAction { actor: P2, .. }));
    assert_eq!(game.history().len(), 1);
}

/// A death from effects that leaves one survivor ends the match.
#[test]
fn test_death_from_effects_eliminates() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Tank, "Bo")
        .player(CharacterClass::Wizard, "Cy")
        .build_with_rng(rolls)
        .unwrap();
    game.character_mut(P0)
        .unwrap()
        .add_effect(Effect::damage_over_time("Poison", 500, 1));

    assert!(matches!(game.next_turn(), TurnStep::ActorFell { actor: P0, .. }));
    assert_eq!(game.next_turn(), TurnStep::Over(MatchResult::Elimination { winner: P1 }));
}

/// Everyone dying leaves no winner.
#[test]
fn test_no_survivors() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Tank, "Bo")
        .player(CharacterClass::Wizard, "Cy")
        .build_with_rng(rolls)
        .unwrap();
    game.character_mut(P1).unwrap().set_health(0);
    game.character_mut(P0)
        .unwrap()
        .add_effect(Effect::damage_over_time("Poison", 500, 1));

    assert!(matches!(game.next_turn(), TurnStep::ActorFell { actor: P0, .. }));
    assert_eq!(game.next_turn(), TurnStep::Over(MatchResult::NoSurvivors));
}

/// With every opponent gone, a targeted action reports NoValidTarget.
#[test]
fn test_no_valid_target() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Wizard, "Cy")
        .player(CharacterClass::Rogue, "Ana")
        .build_with_rng(rolls)
        .unwrap();

    game.next_turn();
    game.character_mut(P1).unwrap().set_health(0);

    assert_eq!(game.choose_action(Action::attack(P1)), Err(ActionError::NoValidTarget));
    assert_eq!(
        game.choose_action(Action::ability_on(0, P1)),
        Err(ActionError::NoValidTarget)
    );
    assert_eq!(game.roster()[P0].abilities()[0].uses_remaining(), 1);
    assert_eq!(game.choose_action(Action::Pass), Ok(ActionOutcome::Passed));
}

/// A character killed outside the turn flow loses its pending action
/// and cannot be brought back.
#[test]
fn test_dead_actor_cannot_act_or_revive() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1, P2]);
    let mut game = Match::builder(MatchConfig::default())
        .player(CharacterClass::Rogue, "Ana")
        .player(CharacterClass::Tank, "Bo")
        .player(CharacterClass::Wizard, "Cy")
        .build_with_rng(rolls)
        .unwrap();

    expect_actor_is(&mut game, P0);
    game.character_mut(P0).unwrap().set_health(0);

    assert!(matches!(
        game.choose_action(Action::Pass),
        Err(ActionError::InvalidSelection { .. })
    ));
    assert!(game.history().is_empty());

    game.character_mut(P0).unwrap().set_health(50);
    assert!(!game.roster()[P0].is_alive());
    assert_eq!(game.alive_targets(P1), vec![P2]);
    expect_actor_is(&mut game, P1);
}

// =============================================================================
// Turn order
// =============================================================================

/// An injected source that hands back a broken turn order cannot stall or
/// crash the match.
#[test]
fn test_broken_turn_order_uses_roster_order() {
    for drawn in [vec![P0, PlayerId::new(5)], vec![P1, P1]] {
        let rolls = ScriptedRolls::constant(0.99).with_turn_order(drawn);
        let mut game = Match::builder(MatchConfig::default().with_max_rounds(2))
            .player(CharacterClass::Rogue, "Ana")
            .player(CharacterClass::Tank, "Bo")
            .build_with_rng(rolls)
            .unwrap();

        let mut provider = Scripted::default();
        let result = game.run(&mut provider);

        assert_eq!(game.turn_order(), &[P0, P1]);
        assert_eq!(provider.turns, vec![(P0, 0), (P1, 0), (P0, 0), (P1, 0)]);
        assert_eq!(result, MatchResult::RoundLimit { winner: P1, health: 220 });
    }
}

// =============================================================================
// Decision provider loop
// =============================================================================

/// Refused actions are reported and asked again without limit.
#[test]
fn test_run_reprompts_until_valid() {
    let rolls = ScriptedRolls::constant(0.99).with_turn_order(vec![P0, P1]);
    let mut game = Match::builder(MatchConfig::default().with_max_rounds(1))
        .player(CharacterClass::Wizard, "Cy")
        .player(CharacterClass::Rogue, "Ana")
        .build_with_rng(rolls)
        .unwrap();

    let mut provider = Scripted::new(vec![
        Action::ability(5),        // no such slot
        Action::attack(P0),        // self
        Action::ability(1),        // Burn without a target
        Action::ability_on(1, P1), // accepted
        Action::Pass,              // Ana
    ]);
    let result = game.run(&mut provider);

    assert_eq!(provider.rejections.len(), 3);
    assert!(provider
        .rejections
        .iter()
        .all(|e| matches!(e, ActionError::InvalidSelection { .. })));
    assert_eq!(provider.resolved.len(), 2);
    assert_eq!(provider.turns, vec![(P0, 0), (P1, 1)]);
    assert_eq!(game.roster()[P1].health(), 73);
    assert_eq!(result, MatchResult::RoundLimit { winner: P1, health: 73 });
}

/// Same seed and same decisions replay the same match.
#[test]
fn test_seeded_matches_replay() {
    let play = |seed: u64| {
        let mut game = Match::builder(MatchConfig::default().with_seed(seed).with_max_rounds(20))
            .player(CharacterClass::Rogue, "Ana")
            .player(CharacterClass::Tank, "Bo")
            .player(CharacterClass::Wizard, "Cy")
            .player(CharacterClass::Paladin, "Di")
            .build()
            .unwrap();
        let result = game.run(&mut attack_first);
        (game.turn_order().to_vec(), game.history().to_vec(), result)
    };

    assert_eq!(play(1234), play(1234));
}

/// Four-player free-for-all always finishes with a consistent result.
#[test]
fn test_four_player_matches_finish() {
    init_tracing();
    for seed in 0..20 {
        let characters = CharacterClass::ALL
            .iter()
            .map(|class| class.create(class.name()))
            .collect();
        let mut game =
            Match::with_rng(characters, MatchConfig::default().with_max_rounds(15), GameRng::new(seed))
                .unwrap();

        let result = game.run(&mut attack_first);

        assert_eq!(game.rng().seed(), seed);
        assert!(game.is_over());
        assert!(game.round() <= 15);
        let mut order: Vec<_> = game.turn_order().to_vec();
        order.sort_by_key(|p| p.index());
        assert_eq!(order, PlayerId::all(4).collect::<Vec<_>>());

        match result {
            MatchResult::Elimination { winner } => {
                assert_eq!(game.roster().alive_ids().collect::<Vec<_>>(), vec![winner]);
            }
            MatchResult::RoundLimit { winner, health } => {
                assert!(game.roster().alive_count() >= 2);
                assert_eq!(game.roster()[winner].health(), health);
                assert!(game.roster().iter().all(|(_, c)| c.health() <= health));
            }
            MatchResult::NoSurvivors => panic!("attacks alone cannot kill everyone"),
        }
    }
}
