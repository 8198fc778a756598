//! # turn-arena
//!
//! A turn-based arena combat engine for 2-4 class-based characters.
//!
//! ## Design Principles
//!
//! 1. **Engine Only**: No input or rendering. Menus drive a match through
//!    `Match::next_turn`/`Match::choose_action` or a `DecisionProvider`,
//!    and get plain data back.
//!
//! 2. **Injected Randomness**: Every parry, crit and turn-order draw goes
//!    through a `RandomSource` owned by the match. Seeded `GameRng` for play,
//!    `ScriptedRolls` for exact scenarios.
//!
//! 3. **Retryable Errors**: Invalid selections, exhausted abilities and
//!    missing targets are rejected without touching state.
//!
//! ## Modules
//!
//! - `core`: Player ids, roster, actions, errors, RNG, configuration
//! - `effects`: Timed effects, the ability catalog, payload resolution
//! - `characters`: Class presets and per-character combat rules
//! - `rules`: Match results and the decision-provider seam
//! - `arena`: The turn resolver
//!
//! ## Example
//!
//! ```
//! use turn_arena::{Action, CharacterClass, Match, MatchConfig, Roster, PlayerId};
//!
//! let mut game = Match::builder(MatchConfig::default().with_max_rounds(5).with_seed(7))
//!     .player(CharacterClass::Rogue, "Ana")
//!     .player(CharacterClass::Tank, "Bo")
//!     .build()
//!     .unwrap();
//!
//! // Everyone attacks the first living opponent
//! let result = game.run(&mut |roster: &Roster, actor: PlayerId| {
//!     match roster.alive_targets(actor).first() {
//!         Some(&target) => Action::attack(target),
//!         None => Action::Pass,
//!     }
//! });
//!
//! assert!(result.winner().is_some());
//! ```

pub mod core;
pub mod effects;
pub mod characters;
pub mod rules;
pub mod arena;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionOutcome, ActionRecord, ConfigError, GameRng, GameRngState,
    MatchConfig, PlayerId, RandomSource, Roster, ScriptedRolls,
};

pub use crate::effects::{
    Ability, AbilityKind, AbilityListing, AbilityOutcome, AbilityTarget, Effect, EffectKind,
    Stat, TickChange, TickReport, Usage,
};

pub use crate::characters::{AttackOutcome, Character, CharacterClass, HitOutcome};

pub use crate::rules::{DecisionProvider, MatchResult};

pub use crate::arena::{Match, MatchBuilder, MatchPhase, TurnStep};
