//! Characters and their class presets.
//!
//! - `CharacterClass`: the four fixed presets (stats + ability pair)
//! - `Character`: runtime state of one combatant

mod class;
mod character;

pub use class::{CharacterClass, ClassPreset};
pub use character::{AttackOutcome, Character, HitOutcome, PROBABILITY_CAP};
