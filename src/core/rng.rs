//! Injectable randomness for parry, crit and turn-order draws.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Injectable**: Every random draw goes through [`RandomSource`]
//! - **Scriptable**: [`ScriptedRolls`] replays fixed rolls for exact scenarios
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use turn_arena::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.roll();
//! assert!((0.0..1.0).contains(&roll));
//!
//! // Same seed, same rolls
//! let mut again = GameRng::new(42);
//! assert_eq!(roll, again.roll());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A source of uniform `[0, 1)` rolls.
///
/// Combat never reaches for a global generator: the match owns one source
/// and lends it to every character operation that needs a roll.
pub trait RandomSource {
    /// Draw one uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Permute the turn order in place.
    fn shuffle_order(&mut self, order: &mut [PlayerId]);
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }

    fn shuffle_order(&mut self, order: &mut [PlayerId]) {
        (**self).shuffle_order(order);
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for inspection or replay.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a captured state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn shuffle_order(&mut self, order: &mut [PlayerId]) {
        self.shuffle(order);
    }
}

/// Captured RNG position.
///
/// Uses the ChaCha8 word position so capture is O(1) regardless of
/// how many rolls have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of rolls.
///
/// Once the script runs out every further roll returns `fallback`
/// (0.99 by default, which neither parries nor crits at the 0.95 cap).
/// The turn order is left in roster order unless one is scripted.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    fallback: f64,
    turn_order: Option<Vec<PlayerId>>,
}

impl ScriptedRolls {
    /// Script the given rolls, in draw order.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.99,
            turn_order: None,
        }
    }

    /// A source whose every roll is `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new([]).with_fallback(value)
    }

    /// Roll returned once the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }

    /// Turn order handed out by the next shuffle.
    #[must_use]
    pub fn with_turn_order(mut self, order: Vec<PlayerId>) -> Self {
        self.turn_order = Some(order);
        self
    }

    /// Queue more rolls behind the current script.
    pub fn push(&mut self, roll: f64) {
        self.rolls.push_back(roll);
    }

    /// Rolls not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Default for ScriptedRolls {
    fn default() -> Self {
        Self::new([])
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }

    fn shuffle_order(&mut self, order: &mut [PlayerId]) {
        if let Some(scripted) = &self.turn_order {
            if scripted.len() == order.len() {
                order.copy_from_slice(scripted);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(), rng2.roll());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.roll()).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.roll()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_roll_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let roll = rng.roll();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[test]
    fn test_shuffle_order_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut order: Vec<_> = PlayerId::all(4).collect();

        rng.shuffle_order(&mut order);

        let mut sorted = order.clone();
        sorted.sort_by_key(|p| p.index());
        assert_eq!(sorted, PlayerId::all(4).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.roll();
        }

        let state = rng.state();
        assert_eq!(state.seed, rng.seed());
        let expected: Vec<_> = (0..10).map(|_| rng.roll()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_rolls_then_fallback() {
        let mut rolls = ScriptedRolls::new([0.1, 0.5]).with_fallback(0.7);

        assert_eq!(rolls.roll(), 0.1);
        assert_eq!(rolls.roll(), 0.5);
        assert_eq!(rolls.remaining(), 0);
        assert_eq!(rolls.roll(), 0.7);
        assert_eq!(rolls.roll(), 0.7);
    }

    #[test]
    fn test_scripted_turn_order() {
        let scripted = vec![PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)];
        let mut rolls = ScriptedRolls::default().with_turn_order(scripted.clone());

        let mut order: Vec<_> = PlayerId::all(3).collect();
        rolls.shuffle_order(&mut order);
        assert_eq!(order, scripted);

        // Length mismatch leaves roster order alone
        let mut short: Vec<_> = PlayerId::all(2).collect();
        rolls.shuffle_order(&mut short);
        assert_eq!(short, vec![PlayerId::new(0), PlayerId::new(1)]);
    }
}
