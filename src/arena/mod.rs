//! Match orchestration.
//!
//! `Match` owns the roster, the random source and the turn order, and
//! drives characters through rounds until elimination or the round limit.

mod game;

pub use game::{Match, MatchBuilder, MatchPhase, TurnStep};
