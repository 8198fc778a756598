//! Effect and ability system.
//!
//! - `Effect`: timed modifiers attached to characters (DoT, HoT, buffs)
//! - `Ability`: catalog abilities with their usage budgets
//! - `TargetSpec`: who an ability lands on
//! - `EffectResolver`: applies ability payloads to characters
//!
//! ## Design Philosophy
//!
//! Abilities are a closed set of variants. Each one only produces a payload;
//! budget bookkeeping and target validation are shared.

mod effect;
mod ability;
mod targeting;
mod resolver;

pub use effect::{Effect, EffectKind, Stat, TickChange, TickReport};
pub use ability::{Ability, AbilityKind, AbilityListing, AbilityPayload, Usage};
pub use targeting::{AbilityTarget, TargetSpec};
pub use resolver::{AbilityOutcome, EffectResolver};
