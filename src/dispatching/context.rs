//! Deficit tracking for candidate ranking.

use std::collections::HashMap;

use crate::models::{Employee, TargetSpec};

/// How far `current` sits below the target's minimum.
///
/// Positive = still owed shifts. `None` when the target is malformed.
/// This is a minimum-target measure only; it says nothing about the
/// target's maximum.
pub fn deficit(target: &TargetSpec, current: u32) -> Option<i64> {
    target
        .floor()
        .map(|floor| i64::from(floor) - i64::from(current))
}

/// Running assignment state passed to ranking rules.
///
/// Holds each employee's target and the number of shifts placed so far
/// in the week being processed. Names absent from the roster have an
/// unset target (floor 0).
#[derive(Debug, Clone, Default)]
pub struct DeficitTracker {
    targets: HashMap<String, TargetSpec>,
    counts: HashMap<String, u32>,
}

impl DeficitTracker {
    /// Creates a tracker with the roster's targets and zero counts.
    pub fn new(roster: &[Employee]) -> Self {
        Self {
            targets: roster
                .iter()
                .map(|e| (e.name.clone(), e.target.clone()))
                .collect(),
            counts: HashMap::new(),
        }
    }

    /// Sets a target from its textual form.
    pub fn with_target(mut self, name: impl Into<String>, raw: &str) -> Self {
        self.targets.insert(name.into(), TargetSpec::parse(raw));
        self
    }

    /// Sets a running count.
    pub fn with_count(mut self, name: impl Into<String>, count: u32) -> Self {
        self.counts.insert(name.into(), count);
        self
    }

    /// Clears all counts and starts `names` at zero.
    pub fn reset<S: AsRef<str>>(&mut self, names: &[S]) {
        self.counts.clear();
        for name in names {
            self.counts.insert(name.as_ref().to_string(), 0);
        }
    }

    /// Shifts placed so far.
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Records one more placement.
    pub fn record(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Target for a name (unset if unknown).
    pub fn target(&self, name: &str) -> &TargetSpec {
        static UNSET: TargetSpec = TargetSpec::Unset;
        self.targets.get(name).unwrap_or(&UNSET)
    }

    /// Current deficit for a name.
    pub fn deficit(&self, name: &str) -> Option<i64> {
        deficit(self.target(name), self.count(name))
    }
}
