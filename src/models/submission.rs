//! Availability submission model.
//!
//! One submission per employee per cycle: for each day of the cycle, a
//! comma-separated list of shift labels the employee can work. The
//! response store may hold several submissions per name; only the most
//! recent one counts.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A submitted availability form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// When the form was submitted. `None` sorts first.
    pub submitted_at: Option<NaiveDateTime>,
    /// Employee name as typed.
    pub name: String,
    /// Raw requests per day (`"morning, night"`), indexed by global day.
    pub days: Vec<String>,
}

/// Unique and repeated respondent names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RespondentSummary {
    /// Trimmed names in first-seen order.
    pub unique: Vec<String>,
    /// Names that submitted more than once, in first-repeat order.
    pub duplicates: Vec<String>,
}

impl Submission {
    /// Creates an undated submission with no requests.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            submitted_at: None,
            name: name.into(),
            days: Vec::new(),
        }
    }

    /// Sets the submission time.
    pub fn at(mut self, submitted_at: NaiveDateTime) -> Self {
        self.submitted_at = Some(submitted_at);
        self
    }

    /// Sets the raw request for a global day, padding earlier days with blanks.
    pub fn with_day(mut self, day: usize, requests: impl Into<String>) -> Self {
        if self.days.len() <= day {
            self.days.resize(day + 1, String::new());
        }
        self.days[day] = requests.into();
        self
    }

    /// Trimmed employee name.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Raw request text for a day (empty if absent).
    pub fn requests_on(&self, day: usize) -> &str {
        self.days.get(day).map(String::as_str).unwrap_or("")
    }
}

/// Keeps the latest submission per name.
///
/// Rows with a blank name are dropped. Submissions are ordered by time
/// (stable for equal times), later rows overwrite earlier ones, and each
/// name keeps the position where it first appeared.
pub fn dedup_latest(submissions: Vec<Submission>) -> Vec<Submission> {
    let mut rows: Vec<Submission> = submissions
        .into_iter()
        .filter(|s| !s.trimmed_name().is_empty())
        .collect();
    rows.sort_by_key(|s| s.submitted_at);

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<Submission> = Vec::new();
    for row in rows {
        let key = row.trimmed_name().to_string();
        match slots.get(&key) {
            Some(&i) => latest[i] = row,
            None => {
                slots.insert(key, latest.len());
                latest.push(row);
            }
        }
    }
    latest
}

impl RespondentSummary {
    /// Collects respondent names from raw submissions.
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let mut summary = Self::default();
        for name in submissions.iter().map(Submission::trimmed_name) {
            if name.is_empty() {
                continue;
            }
            if !summary.unique.iter().any(|n| n == name) {
                summary.unique.push(name.to_string());
            } else if !summary.duplicates.iter().any(|n| n == name) {
                summary.duplicates.push(name.to_string());
            }
        }
        summary
    }

    /// Number of distinct respondents.
    pub fn count(&self) -> usize {
        self.unique.len()
    }
}
