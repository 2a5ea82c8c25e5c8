//! Availability index.
//!
//! Turns submissions into candidate pools keyed by `(global day, label)`.
//! Labels are stored exactly as submitted (trimmed); the engine only asks
//! for the three configured shift labels, so anything else is carried
//! but never used.

use std::collections::HashMap;

use crate::models::Submission;

/// Candidate pools for one cycle. Rebuilt on every assignment run.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    pools: HashMap<(usize, String), Vec<String>>,
    respondents: Vec<String>,
}

impl AvailabilityIndex {
    /// Builds pools from the first `days` request columns of each submission.
    ///
    /// Submissions with a blank name are skipped. Pool order follows the
    /// order of the input rows.
    pub fn build(submissions: &[Submission], days: usize) -> Self {
        let mut index = Self::default();

        for submission in submissions {
            let name = submission.trimmed_name();
            if name.is_empty() {
                continue;
            }
            if !index.respondents.iter().any(|r| r == name) {
                index.respondents.push(name.to_string());
            }

            for day in 0..days {
                for label in submission
                    .requests_on(day)
                    .split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                {
                    index
                        .pools
                        .entry((day, label.to_string()))
                        .or_default()
                        .push(name.to_string());
                }
            }
        }

        index
    }

    /// Employees who asked for `label` on `day`.
    pub fn candidates(&self, day: usize, label: &str) -> &[String] {
        self.pools
            .get(&(day, label.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names with at least one submission, in input order.
    pub fn respondents(&self) -> &[String] {
        &self.respondents
    }

    /// Whether no submission contributed.
    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }

    /// Number of `(day, label)` pools.
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pools() {
        let subs = vec![
            Submission::new("Noa")
                .with_day(0, "morning, night")
                .with_day(13, "afternoon"),
            Submission::new("Avi").with_day(0, "morning"),
        ];
        let index = AvailabilityIndex::build(&subs, 14);

        assert_eq!(index.candidates(0, "morning"), ["Noa", "Avi"]);
        assert_eq!(index.candidates(0, "night"), ["Noa"]);
        assert_eq!(index.candidates(13, "afternoon"), ["Noa"]);
        assert!(index.candidates(1, "morning").is_empty());
        assert_eq!(index.respondents(), ["Noa", "Avi"]);
    }

    #[test]
    fn test_skips_blank_names() {
        let subs = vec![Submission::new("   ").with_day(0, "morning")];
        let index = AvailabilityIndex::build(&subs, 14);
        assert!(index.is_empty());
        assert!(index.candidates(0, "morning").is_empty());
    }

    #[test]
    fn test_unknown_labels_kept() {
        let subs = vec![Submission::new("Noa").with_day(2, "evening,,morning")];
        let index = AvailabilityIndex::build(&subs, 14);
        assert_eq!(index.candidates(2, "evening"), ["Noa"]);
        assert_eq!(index.candidates(2, "morning"), ["Noa"]);
        assert_eq!(index.pool_count(), 2);
    }

    #[test]
    fn test_ignores_columns_past_cycle() {
        let subs = vec![Submission::new("Noa").with_day(14, "morning")];
        let index = AvailabilityIndex::build(&subs, 14);
        assert_eq!(index.pool_count(), 0);
        assert_eq!(index.respondents(), ["Noa"]);
    }
}
