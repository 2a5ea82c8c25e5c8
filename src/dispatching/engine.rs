//! Rule engine for candidate ranking.
//!
//! Chains ranking rules sequentially: the next rule is consulted only
//! when all earlier rules tie.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{rules, CandidateRule, DeficitTracker, RuleScore};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Keep the incoming order (stable sort).
    #[default]
    Stable,
    /// Lexicographic by name.
    ByName,
}

/// A composable rule chain for candidate ranking.
///
/// # Example
/// ```
/// use u_shift::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::MostBehindTarget)
///     .with_tie_breaker(rules::LeastLoaded);
/// assert_eq!(engine.rule_names(), vec!["DEFICIT", "LOAD"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn CandidateRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
            epsilon: 1e-9,
        }
    }

    /// Deficit first, then least loaded.
    pub fn deficit_first() -> Self {
        Self::new()
            .with_rule(rules::MostBehindTarget)
            .with_tie_breaker(rules::LeastLoaded)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: CandidateRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Scores from each rule for one candidate.
    pub fn evaluate(&self, candidate: &str, tracker: &DeficitTracker) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|r| r.evaluate(candidate, tracker))
            .collect()
    }

    /// Sorts candidates by priority (highest first). Stable.
    pub fn rank(&self, candidates: &mut Vec<String>, tracker: &DeficitTracker) {
        if candidates.len() < 2 {
            return;
        }

        let mut scored: Vec<(Vec<RuleScore>, String)> = candidates
            .drain(..)
            .map(|c| (self.evaluate(&c, tracker), c))
            .collect();
        scored.sort_by(|a, b| self.compare_sequential(a, b));
        candidates.extend(scored.into_iter().map(|(_, c)| c));
    }

    /// Shuffles, then stable-sorts.
    ///
    /// Candidates that tie on every rule end up in random order, so the
    /// outcome differs from run to run.
    pub fn shuffle_and_rank<R: Rng + ?Sized>(
        &self,
        candidates: &mut Vec<String>,
        tracker: &DeficitTracker,
        rng: &mut R,
    ) {
        candidates.shuffle(rng);
        self.rank(candidates, tracker);
    }

    fn compare_sequential(
        &self,
        (scores_a, a): &(Vec<RuleScore>, String),
        (scores_b, b): &(Vec<RuleScore>, String),
    ) -> Ordering {
        for (sa, sb) in scores_a.iter().zip(scores_b) {
            if (sa - sb).abs() > self.epsilon {
                return sa.partial_cmp(sb).unwrap_or(Ordering::Equal);
            }
        }

        match &self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ByName => a.cmp(b),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
