//! Cycle calendar.
//!
//! A cycle starts on the `START_DATE` anchor (the first day of week one)
//! and runs for `weeks × days_per_week` consecutive days. The anchor is
//! entered as `DD.MM.YYYY`.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::CycleConfig;
use crate::error::ShiftError;

/// Date arithmetic for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleCalendar {
    /// First day of week one.
    pub start: NaiveDate,
    days_per_week: usize,
    weeks: usize,
}

/// Parses a `DD.MM.YYYY` start date.
pub fn parse_start_date(text: &str) -> Result<NaiveDate, ShiftError> {
    NaiveDate::parse_from_str(text.trim(), "%d.%m.%Y")
        .map_err(|_| ShiftError::InvalidStartDate(text.to_string()))
}

/// Formats a date as `DD.MM.YYYY`.
pub fn format_start_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

impl CycleCalendar {
    /// Creates a calendar anchored at `start`.
    pub fn new(start: NaiveDate, config: &CycleConfig) -> Self {
        Self {
            start,
            days_per_week: config.days_per_week,
            weeks: config.weeks,
        }
    }

    /// Date of a global day index. `None` past the end of the cycle.
    pub fn date_of(&self, global_day: usize) -> Option<NaiveDate> {
        if global_day >= self.weeks * self.days_per_week {
            return None;
        }
        self.start.checked_add_days(Days::new(global_day as u64))
    }

    /// First and last date of a week.
    pub fn week_span(&self, week: usize) -> Option<(NaiveDate, NaiveDate)> {
        let first = week * self.days_per_week;
        Some((self.date_of(first)?, self.date_of(first + self.days_per_week - 1)?))
    }

    /// Last date of the cycle.
    pub fn end(&self) -> Option<NaiveDate> {
        self.date_of(self.weeks * self.days_per_week - 1)
    }
}
