//! Employee (roster row) model.
//!
//! An employee is identified by name and carries a target shift count,
//! either exact (`"3"`) or an inclusive range (`"3-5"`). The roster also
//! records, per week, how many shifts the employee actually holds and
//! whether that count satisfies the target.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Target number of shifts per week.
///
/// Parsed once when the roster is loaded. Malformed text is kept so it
/// can be reported; it never satisfies a count and has no deficit floor.
/// Stored as its text form (`"3"`, `"3-5"`, `""`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetSpec {
    /// Exactly `n` shifts.
    Exact(u32),
    /// Between `min` and `max` shifts, inclusive.
    Range { min: u32, max: u32 },
    /// No target given.
    #[default]
    Unset,
    /// Text that is neither an integer nor a `min-max` range.
    Malformed(String),
}

/// Per-week OK/Check status of an employee's actual count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    Ok,
    Check,
}

/// Actual count and status for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTally {
    pub actual: u32,
    pub status: StaffStatus,
}

/// A roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique name, also the value written into grid cells. Trimmed.
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    /// Notification address (empty = not notified).
    #[serde(default)]
    pub email: String,
    /// Weekly target.
    #[serde(default)]
    pub target: TargetSpec,
    /// Tallies per week, written by the status sync.
    #[serde(default)]
    pub weeks: Vec<WeekTally>,
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

impl TargetSpec {
    /// Parses `"n"`, `"min-max"` or blank.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return Self::Unset;
        }
        let parsed = match text.split_once('-') {
            Some((lo, hi)) => match (lo.trim().parse(), hi.trim().parse()) {
                (Ok(min), Ok(max)) => Some(Self::Range { min, max }),
                _ => None,
            },
            None => text.parse().ok().map(Self::Exact),
        };
        parsed.unwrap_or_else(|| Self::Malformed(text.to_string()))
    }

    /// Minimum number of shifts, used as the deficit floor.
    ///
    /// `Unset` counts as zero; `Malformed` has no floor.
    pub fn floor(&self) -> Option<u32> {
        match self {
            Self::Exact(n) => Some(*n),
            Self::Range { min, .. } => Some(*min),
            Self::Unset => Some(0),
            Self::Malformed(_) => None,
        }
    }

    /// Whether `actual` meets this target.
    pub fn is_satisfied_by(&self, actual: u32) -> bool {
        match self {
            Self::Exact(n) => actual == *n,
            Self::Range { min, max } => (*min..=*max).contains(&actual),
            Self::Unset | Self::Malformed(_) => false,
        }
    }

    /// OK/Check status for an actual count.
    pub fn status_for(&self, actual: u32) -> StaffStatus {
        if self.is_satisfied_by(actual) {
            StaffStatus::Ok
        } else {
            StaffStatus::Check
        }
    }

    /// Whether this spec failed to parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
            Self::Unset => Ok(()),
            Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for TargetSpec {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<TargetSpec> for String {
    fn from(target: TargetSpec) -> Self {
        target.to_string()
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Check => f.write_str("Check"),
        }
    }
}

impl WeekTally {
    /// Builds a tally, deriving the status from the target.
    pub fn new(actual: u32, target: &TargetSpec) -> Self {
        Self {
            actual,
            status: target.status_for(actual),
        }
    }
}

impl Employee {
    /// Creates an employee with an unset target.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: String::new(),
            target: TargetSpec::Unset,
            weeks: Vec::new(),
        }
    }

    /// Sets the target from its textual form.
    pub fn with_target(mut self, raw: &str) -> Self {
        self.target = TargetSpec::parse(raw);
        self
    }

    /// Sets the notification address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the tally for a week, growing the list as needed.
    pub fn with_tally(mut self, week: usize, tally: WeekTally) -> Self {
        self.set_tally(week, tally);
        self
    }

    /// Records the tally for a week.
    pub fn set_tally(&mut self, week: usize, tally: WeekTally) {
        if self.weeks.len() <= week {
            self.weeks.resize(
                week + 1,
                WeekTally {
                    actual: 0,
                    status: StaffStatus::Check,
                },
            );
        }
        self.weeks[week] = tally;
    }

    /// Stored status for a week, `None` if never synced.
    pub fn status_for_week(&self, week: usize) -> Option<StaffStatus> {
        self.weeks.get(week).map(|t| t.status)
    }

    /// Whether this employee can be notified.
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}
