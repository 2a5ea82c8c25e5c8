//! Built-in ranking rules.
//!
//! All rules return lower scores for candidates that should be placed first.

use super::{CandidateRule, DeficitTracker, RuleScore};

/// Largest deficit first.
///
/// Prefers whoever is furthest below their minimum target. A candidate
/// whose target is malformed has no deficit and sorts after everyone else.
#[derive(Debug, Clone, Copy)]
pub struct MostBehindTarget;

impl CandidateRule for MostBehindTarget {
    fn name(&self) -> &'static str {
        "DEFICIT"
    }

    fn evaluate(&self, candidate: &str, tracker: &DeficitTracker) -> RuleScore {
        tracker
            .deficit(candidate)
            .map(|d| -(d as f64))
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Most Behind Minimum Target"
    }
}

/// Fewest shifts so far first.
#[derive(Debug, Clone, Copy)]
pub struct LeastLoaded;

impl CandidateRule for LeastLoaded {
    fn name(&self) -> &'static str {
        "LOAD"
    }

    fn evaluate(&self, candidate: &str, tracker: &DeficitTracker) -> RuleScore {
        tracker.count(candidate) as f64
    }

    fn description(&self) -> &'static str {
        "Least Loaded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_behind_target() {
        let t = DeficitTracker::default()
            .with_target("A", "3")
            .with_target("B", "1-4")
            .with_target("C", "bad")
            .with_count("A", 1);

        // A: 3-1 = 2, B: 1-0 = 1
        assert!(MostBehindTarget.evaluate("A", &t) < MostBehindTarget.evaluate("B", &t));
        assert_eq!(MostBehindTarget.evaluate("C", &t), f64::MAX);
        // Unknown name: floor 0, deficit 0
        assert_eq!(MostBehindTarget.evaluate("Z", &t), 0.0);
    }

    #[test]
    fn test_least_loaded() {
        let t = DeficitTracker::default().with_count("A", 2);
        assert_eq!(LeastLoaded.evaluate("A", &t), 2.0);
        assert_eq!(LeastLoaded.evaluate("B", &t), 0.0);
        assert_eq!(LeastLoaded.name(), "LOAD");
    }
}
