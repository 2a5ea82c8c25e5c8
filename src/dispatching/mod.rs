//! Candidate ranking for shift placement.
//!
//! Ranking rules score a candidate against the running [`DeficitTracker`];
//! a [`RuleEngine`] chains them (primary rule, then tie-breakers) and
//! orders a candidate list with a shuffle-then-stable-sort step, so equal
//! candidates come out in a different order on each run.
//!
//! # Usage
//!
//! ```
//! use u_shift::dispatching::{rules, DeficitTracker, RuleEngine};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::MostBehindTarget)
//!     .with_tie_breaker(rules::LeastLoaded);
//!
//! let tracker = DeficitTracker::default()
//!     .with_target("A", "1")
//!     .with_target("B", "3");
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut candidates = vec!["A".to_string(), "B".to_string()];
//! engine.shuffle_and_rank(&mut candidates, &tracker, &mut rng);
//! assert_eq!(candidates[0], "B");
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{deficit, DeficitTracker};
pub use engine::{RuleEngine, TieBreaker};

use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher priority (placed first).
pub type RuleScore = f64;

/// A rule that scores a candidate for the slot being filled.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait CandidateRule: Send + Sync + Debug {
    /// Short rule name.
    fn name(&self) -> &'static str;

    /// Scores a candidate given the running assignment state.
    fn evaluate(&self, candidate: &str, tracker: &DeficitTracker) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
