//! Week status resolution.
//!
//! Maps a week's [`ValidationState`] plus the response and notification
//! counters to exactly one status message. The first matching row wins:
//!
//! | # | Condition | Message | Tone |
//! |---|-----------|---------|------|
//! | 1 | week is green | finished | success |
//! | 2 | empty, everyone responded, roster non-empty | data ready | success |
//! | 3 | empty, emails sent | waiting (n/total) | warning |
//! | 4 | empty | fresh cycle | success |
//! | 5 | unknown name | name error | error |
//! | 6 | double shift | double shift | error |
//! | 7 | night then morning | night-morning | error |
//! | 8 | otherwise | in progress | info |
//!
//! Duplicate respondents produce a separate warning line.

use std::fmt;

use crate::config::{Swatch, Theme};
use crate::models::RespondentSummary;
use crate::validation::ValidationState;

/// Presentation tone of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Warning,
    Error,
    Info,
}

impl StatusTone {
    /// Theme colours for this tone.
    pub fn swatch(self, theme: &Theme) -> &Swatch {
        match self {
            Self::Success => &theme.success,
            Self::Warning => &theme.warning,
            Self::Error => &theme.error,
            Self::Info => &theme.info,
        }
    }
}

/// The main status of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Finished,
    DataReady,
    WaitingForResponses { received: usize, total: usize },
    FreshCycle,
    NameError,
    DoubleShift,
    NightMorning,
    InProgress,
}

impl StatusMessage {
    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Finished | Self::DataReady | Self::FreshCycle => StatusTone::Success,
            Self::WaitingForResponses { .. } => StatusTone::Warning,
            Self::NameError | Self::DoubleShift | Self::NightMorning => StatusTone::Error,
            Self::InProgress => StatusTone::Info,
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone() == StatusTone::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => f.write_str("Schedule finished"),
            Self::DataReady => f.write_str("All responses are in, run the assignment"),
            Self::WaitingForResponses { received, total } => {
                write!(f, "Waiting for responses ({received}/{total})")
            }
            Self::FreshCycle => f.write_str("New cycle, send the request emails"),
            Self::NameError => f.write_str("Unrecognized name in the schedule"),
            Self::DoubleShift => f.write_str("Someone is booked twice on one day"),
            Self::NightMorning => f.write_str("Night shift followed by a morning shift"),
            Self::InProgress => f.write_str("Schedule in progress"),
        }
    }
}

/// Counters that feed the status besides the validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInputs {
    /// Distinct respondents this cycle.
    pub respondents: usize,
    /// Roster size.
    pub roster_size: usize,
    /// Whether request emails went out this cycle.
    pub emails_sent: bool,
    /// Names that submitted more than once.
    pub duplicates: Vec<String>,
}

impl StatusInputs {
    pub fn new(summary: &RespondentSummary, roster_size: usize, emails_sent: bool) -> Self {
        Self {
            respondents: summary.count(),
            roster_size,
            emails_sent,
            duplicates: summary.duplicates.clone(),
        }
    }
}

/// Resolved status of one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub week: usize,
    pub message: StatusMessage,
    /// Secondary warning listing duplicate respondents; `None` clears it.
    pub duplicate_warning: Option<String>,
}

/// Picks the status for one week.
pub fn resolve(week: usize, state: &ValidationState, inputs: &StatusInputs) -> StatusReport {
    let all_in = inputs.respondents >= inputs.roster_size;

    let message = if state.should_be_green {
        StatusMessage::Finished
    } else if state.is_empty {
        if all_in && inputs.roster_size > 0 {
            StatusMessage::DataReady
        } else if inputs.emails_sent {
            StatusMessage::WaitingForResponses {
                received: inputs.respondents,
                total: inputs.roster_size,
            }
        } else {
            StatusMessage::FreshCycle
        }
    } else if state.has_name_error {
        StatusMessage::NameError
    } else if state.has_double_shift {
        StatusMessage::DoubleShift
    } else if state.has_night_morning {
        StatusMessage::NightMorning
    } else {
        StatusMessage::InProgress
    };

    let duplicate_warning = if inputs.duplicates.is_empty() {
        None
    } else {
        Some(format!("Duplicate responses: {}", inputs.duplicates.join(", ")))
    };

    StatusReport {
        week,
        message,
        duplicate_warning,
    }
}
