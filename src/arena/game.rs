//! The match: turn order, rounds, action dispatch and termination.
//!
//! ## Turn flow
//!
//! ```text
//! Setup --start--> RoundInProgress --next_turn--> TurnInProgress
//!                        ^                             |
//!                        +-------choose_action---------+
//!                  (elimination or round limit) --> MatchOver
//! ```
//!
//! The turn order is drawn once at start and reused every round. Each
//! living actor first resolves its effects, then performs exactly one
//! action. Whenever a single character is left alive the match ends at
//! once, even mid-round.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::characters::{Character, CharacterClass};
use crate::core::{
    Action, ActionError, ActionOutcome, ActionRecord, ConfigError, GameRng, MatchConfig, PlayerId,
    RandomSource, Roster,
};
use crate::effects::{AbilityTarget, TargetSpec, TickReport};
use crate::rules::{DecisionProvider, MatchResult};

/// Resolver state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Roster fixed, turn order not drawn yet.
    Setup,
    /// Between turns.
    RoundInProgress,
    /// `actor` resolved its effects and owes one action.
    TurnInProgress { actor: PlayerId },
    MatchOver,
}

/// What [`Match::next_turn`] advanced to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStep {
    /// `actor` is up and must submit an action via [`Match::choose_action`].
    AwaitingAction {
        actor: PlayerId,
        ticks: Vec<TickReport>,
    },
    /// `actor` died from its own effects; its action phase is skipped.
    ActorFell {
        actor: PlayerId,
        ticks: Vec<TickReport>,
    },
    /// The match is over.
    Over(MatchResult),
}

/// A running match.
#[derive(Clone, Debug)]
pub struct Match<R: RandomSource = GameRng> {
    config: MatchConfig,
    roster: Roster,
    turn_order: Vec<PlayerId>,
    /// Current round (0 before start).
    round: u32,
    /// Position in `turn_order` of the next actor.
    next_slot: usize,
    phase: MatchPhase,
    rng: R,
    history: Vec<ActionRecord>,
    result: Option<MatchResult>,
}

impl Match<GameRng> {
    /// Create a match seeded from `config.seed`.
    pub fn new(characters: Vec<Character>, config: MatchConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        Self::with_rng(characters, config, rng)
    }

    /// Start building a roster.
    #[must_use]
    pub fn builder(config: MatchConfig) -> MatchBuilder {
        MatchBuilder::new(config)
    }
}

impl<R: RandomSource> Match<R> {
    /// Create a match drawing every roll from `rng`.
    pub fn with_rng(
        characters: Vec<Character>,
        config: MatchConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate(characters.len())?;
        Ok(Self {
            config,
            roster: Roster::new(characters),
            turn_order: Vec::new(),
            round: 0,
            next_slot: 0,
            phase: MatchPhase::Setup,
            rng,
            history: Vec::new(),
            result: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn character(&self, player: PlayerId) -> Option<&Character> {
        self.roster.get(player)
    }

    /// Mutable access for scenario setup before or between turns.
    #[cfg(any(test, feature = "test-util"))]
    pub fn character_mut(&mut self, player: PlayerId) -> Option<&mut Character> {
        self.roster.get_mut(player)
    }

    /// Turn order drawn at start (empty during setup).
    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    /// Current round, 1-based (0 before start).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// The actor owing an action, if any.
    #[must_use]
    pub fn current_actor(&self) -> Option<PlayerId> {
        match self.phase {
            MatchPhase::TurnInProgress { actor } => Some(actor),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }

    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    /// Accepted actions in the order they happened.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    // === Queries for menus ===

    /// Living characters other than `excluding`, in roster order.
    #[must_use]
    pub fn alive_targets(&self, excluding: PlayerId) -> Vec<PlayerId> {
        self.roster.alive_targets(excluding)
    }

    /// Status line of one character.
    pub fn status_line(&self, player: PlayerId) -> Result<String, ActionError> {
        self.roster
            .get(player)
            .map(Character::status_line)
            .ok_or_else(|| out_of_range(player))
    }

    /// One line per character: 1-based index, status, and ALIVE/DEAD.
    #[must_use]
    pub fn roster_status(&self) -> Vec<String> {
        self.roster
            .iter()
            .map(|(id, c)| {
                let state = if c.is_alive() { "ALIVE" } else { "DEAD" };
                format!("{}) {} - {}", id.ordinal(), c.status_line(), state)
            })
            .collect()
    }

    // === Turn flow ===

    /// Draw the turn order and enter round 1. No-op once started.
    ///
    /// A draw that is not a permutation of the roster is discarded in
    /// favor of roster order.
    pub fn start(&mut self) {
        if self.phase != MatchPhase::Setup {
            return;
        }

        let roster_order: Vec<_> = self.roster.player_ids().collect();
        let mut order = roster_order.clone();
        self.rng.shuffle_order(&mut order);

        let mut sorted = order.clone();
        sorted.sort_by_key(|p| p.index());
        if sorted != roster_order {
            debug!(drawn = ?order, "drawn turn order is not a roster permutation, using roster order");
            order = roster_order;
        }
        self.turn_order = order;
        self.round = 1;
        self.next_slot = 0;
        self.phase = MatchPhase::RoundInProgress;

        info!(turn_order = ?self.turn_order, max_rounds = self.config.max_rounds, "match started");
    }

    /// Advance to the next living actor and resolve its start-of-turn effects.
    ///
    /// Starts the match if needed. If an actor is already waiting, returns it
    /// again without resolving anything.
    pub fn next_turn(&mut self) -> TurnStep {
        match self.phase {
            MatchPhase::Setup => self.start(),
            MatchPhase::MatchOver => {
                return TurnStep::Over(self.result.unwrap_or(MatchResult::NoSurvivors));
            }
            MatchPhase::TurnInProgress { actor } => {
                return TurnStep::AwaitingAction {
                    actor,
                    ticks: Vec::new(),
                };
            }
            MatchPhase::RoundInProgress => {}
        }

        loop {
            if self.next_slot >= self.turn_order.len() {
                if self.round >= self.config.max_rounds {
                    return TurnStep::Over(self.finish_on_round_limit());
                }
                self.round += 1;
                self.next_slot = 0;
                info!(round = self.round, "round started");
            }

            let actor = self.turn_order[self.next_slot];
            self.next_slot += 1;

            let character = &mut self.roster[actor];
            if !character.is_alive() {
                continue;
            }

            debug!(round = self.round, actor = character.name(), "turn started");
            let ticks = character.resolve_start_of_turn();

            if !self.roster[actor].is_alive() {
                self.check_elimination();
                return TurnStep::ActorFell { actor, ticks };
            }

            if let Some(result) = self.check_elimination() {
                return TurnStep::Over(result);
            }

            self.phase = MatchPhase::TurnInProgress { actor };
            return TurnStep::AwaitingAction { actor, ticks };
        }
    }

    /// Apply the waiting actor's action.
    ///
    /// A rejected action changes nothing and the actor stays up, so the
    /// caller can simply ask again. The one exception is an actor that is
    /// no longer alive: its turn ends with the rejection.
    pub fn choose_action(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        let MatchPhase::TurnInProgress { actor } = self.phase else {
            return Err(ActionError::NoTurnInProgress);
        };

        if !self.roster[actor].is_alive() {
            debug!(%actor, "dead actor forfeits its turn");
            self.phase = MatchPhase::RoundInProgress;
            self.check_elimination();
            return Err(ActionError::invalid(format!("{actor} is dead and cannot act")));
        }

        let outcome = match self.apply_action(actor, action) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(%actor, ?action, %error, "action rejected");
                return Err(error);
            }
        };

        debug!(%actor, ?outcome, "action resolved");
        self.history
            .push(ActionRecord::new(self.round, actor, action, outcome.clone()));
        self.phase = MatchPhase::RoundInProgress;
        self.check_elimination();
        Ok(outcome)
    }

    /// Play the whole match, asking `provider` for every action.
    pub fn run<D: DecisionProvider + ?Sized>(&mut self, provider: &mut D) -> MatchResult {
        loop {
            match self.next_turn() {
                TurnStep::Over(result) => return result,
                TurnStep::ActorFell { actor, ticks } => {
                    provider.turn_started(&self.roster, actor, &ticks);
                }
                TurnStep::AwaitingAction { actor, ticks } => {
                    provider.turn_started(&self.roster, actor, &ticks);
                    loop {
                        let action = provider.decide(&self.roster, actor);
                        match self.choose_action(action) {
                            Ok(outcome) => {
                                provider.resolved(&self.roster, actor, &outcome);
                                break;
                            }
                            Err(error) => {
                                provider.rejected(actor, &action, &error);
                                if self.current_actor() != Some(actor) {
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    // === Internals ===

    fn apply_action(
        &mut self,
        actor: PlayerId,
        action: Action,
    ) -> Result<ActionOutcome, ActionError> {
        match action {
            Action::Pass => Ok(ActionOutcome::Passed),

            Action::Attack { target } => {
                let target = self.validate_target(actor, Some(target))?;
                let (attacker, defender) = self
                    .roster
                    .pair_mut(actor, target)
                    .ok_or_else(|| out_of_range(target))?;
                let attack = attacker.perform_basic_attack(defender, &mut self.rng)?;
                Ok(ActionOutcome::Attacked { target, attack })
            }

            Action::UseAbility { slot, target } => {
                let ability = self.roster[actor].ability(slot).ok_or_else(|| {
                    ActionError::invalid(format!("ability slot {slot} out of range"))
                })?;
                ability.ensure_available()?;
                let kind = ability.kind();

                let (landed, outcome) = match kind.target_spec() {
                    TargetSpec::Actor => {
                        if target.is_some_and(|t| t != actor) {
                            return Err(ActionError::invalid(format!(
                                "{kind} can only target its user"
                            )));
                        }
                        let outcome = self.roster[actor].use_ability(
                            slot,
                            AbilityTarget::Actor,
                            &mut self.rng,
                        )?;
                        (actor, outcome)
                    }
                    TargetSpec::Opponent => {
                        let target = self.validate_target(actor, target)?;
                        let (user, other) = self
                            .roster
                            .pair_mut(actor, target)
                            .ok_or_else(|| out_of_range(target))?;
                        let outcome =
                            user.use_ability(slot, AbilityTarget::Other(other), &mut self.rng)?;
                        (target, outcome)
                    }
                };

                Ok(ActionOutcome::AbilityUsed {
                    slot,
                    ability: kind,
                    target: landed,
                    outcome,
                    uses_remaining: self.roster[actor].abilities()[slot].uses_remaining(),
                })
            }
        }
    }

    /// Check a chosen opponent: someone must be targetable at all, then
    /// the choice must be a living character other than the actor.
    fn validate_target(
        &self,
        actor: PlayerId,
        target: Option<PlayerId>,
    ) -> Result<PlayerId, ActionError> {
        let candidates = self.roster.alive_targets(actor);
        if candidates.is_empty() {
            return Err(ActionError::NoValidTarget);
        }

        let target = target.ok_or_else(|| ActionError::invalid("a target is required"))?;
        if target == actor {
            return Err(ActionError::invalid("cannot target yourself"));
        }
        if !self.roster.contains(target) {
            return Err(out_of_range(target));
        }
        if !candidates.contains(&target) {
            return Err(ActionError::invalid(format!("{target} is dead")));
        }
        Ok(target)
    }

    /// End the match if at most one character is alive.
    fn check_elimination(&mut self) -> Option<MatchResult> {
        let alive: Vec<_> = self.roster.alive_ids().take(2).collect();
        let result = match alive.as_slice() {
            [winner] => MatchResult::Elimination { winner: *winner },
            [] => MatchResult::NoSurvivors,
            _ => return None,
        };
        Some(self.finish(result))
    }

    /// Decide on health: greatest wins, earliest in roster order on ties.
    fn finish_on_round_limit(&mut self) -> MatchResult {
        let mut best: Option<(PlayerId, u32)> = None;
        for id in self.roster.alive_ids() {
            let health = self.roster[id].health();
            if best.map_or(true, |(_, top)| health > top) {
                best = Some((id, health));
            }
        }

        let result = match best {
            Some((winner, health)) => MatchResult::RoundLimit { winner, health },
            None => MatchResult::NoSurvivors,
        };
        self.finish(result)
    }

    fn finish(&mut self, result: MatchResult) -> MatchResult {
        self.phase = MatchPhase::MatchOver;
        self.result = Some(result);
        match result.winner() {
            Some(winner) => info!(
                winner = self.roster[winner].name(),
                round = self.round,
                ?result,
                "match over"
            ),
            None => info!(round = self.round, "match over, no survivors"),
        }
        result
    }
}

fn out_of_range(player: PlayerId) -> ActionError {
    ActionError::invalid(format!("{player} is not in the match"))
}

/// Roster builder that fills in blank names.
#[derive(Clone, Debug)]
pub struct MatchBuilder {
    config: MatchConfig,
    characters: Vec<Character>,
}

impl MatchBuilder {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            characters: Vec::new(),
        }
    }

    /// Add a character of `class`. A blank name becomes "Player N".
    #[must_use]
    pub fn player(mut self, class: CharacterClass, name: &str) -> Self {
        let name = name.trim();
        let name = if name.is_empty() {
            format!("Player {}", self.characters.len() + 1)
        } else {
            name.to_string()
        };
        self.characters.push(class.create(name));
        self
    }

    /// Build with an RNG seeded from the config.
    pub fn build(self) -> Result<Match<GameRng>, ConfigError> {
        Match::new(self.characters, self.config)
    }

    /// Build with a caller-supplied random source.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> Result<Match<R>, ConfigError> {
        Match::with_rng(self.characters, self.config, rng)
    }
}
