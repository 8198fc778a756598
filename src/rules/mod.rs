//! Match results and the decision-provider trait.
//!
//! The turn resolver in `arena` calls into `DecisionProvider` for every
//! action and reports the end of a match as a `MatchResult`.

pub mod engine;

pub use engine::{DecisionProvider, MatchResult};
