//! Roster, response and grid stores.
//!
//! The scheduling core never touches storage directly. Workflow triggers
//! read and write through [`ShiftStore`]; two implementations are
//! provided:
//!
//! - [`MemoryStore`]: the whole [`Workbook`] in memory.
//! - [`JsonFileStore`]: the same document persisted as JSON, rewritten
//!   after every mutation.
//!
//! Writes are not transactional across calls. A run that fails between
//! two week writes leaves the first week written.

mod json;
mod memory;
mod notify;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use notify::{LogNotifier, Notifier};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CycleConfig;
use crate::error::StoreError;
use crate::models::{Employee, ScheduleGrid, Submission, WeekGrid};

/// Everything a cycle persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    /// Staff list with per-week tallies.
    pub roster: Vec<Employee>,
    /// Availability responses, possibly with repeats.
    pub submissions: Vec<Submission>,
    pub grid: ScheduleGrid,
    /// Whether request emails went out this cycle.
    #[serde(default)]
    pub emails_sent: bool,
    /// Cycle anchor date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Workbook {
    /// An empty workbook with a blank grid.
    pub fn new(config: &CycleConfig) -> Self {
        Self {
            roster: Vec::new(),
            submissions: Vec::new(),
            grid: ScheduleGrid::new(config),
            emails_sent: false,
            start_date: None,
        }
    }

    pub fn with_roster(mut self, roster: Vec<Employee>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_submissions(mut self, submissions: Vec<Submission>) -> Self {
        self.submissions = submissions;
        self
    }

    /// Copies tallies onto roster rows with the same name.
    ///
    /// Only the tally columns are written; names, emails and targets stay
    /// as the roster keeper entered them.
    pub fn apply_tallies(&mut self, tallied: &[Employee]) {
        for row in &mut self.roster {
            if let Some(source) = tallied.iter().find(|e| e.name == row.name) {
                row.weeks = source.weeks.clone();
            }
        }
    }

    /// Replaces one week of the grid.
    pub fn write_week(&mut self, week: usize, cells: &WeekGrid) -> Result<(), StoreError> {
        let slot = self
            .grid
            .week_mut(week)
            .ok_or(StoreError::MissingWeek(week))?;
        *slot = cells.clone();
        Ok(())
    }
}

/// Storage seam for the workflow triggers.
pub trait ShiftStore {
    /// Roster rows in sheet order.
    fn roster(&self) -> Result<Vec<Employee>, StoreError>;

    /// Writes per-week actual counts and statuses.
    fn save_tallies(&mut self, roster: &[Employee]) -> Result<(), StoreError>;

    /// Responses in stored order.
    fn submissions(&self) -> Result<Vec<Submission>, StoreError>;

    fn replace_submissions(&mut self, submissions: Vec<Submission>) -> Result<(), StoreError>;

    fn clear_submissions(&mut self) -> Result<(), StoreError> {
        self.replace_submissions(Vec::new())
    }

    fn grid(&self) -> Result<ScheduleGrid, StoreError>;

    /// Writes one week of cells (values, choices and colours).
    fn save_week(&mut self, week: usize, cells: &WeekGrid) -> Result<(), StoreError>;

    fn emails_sent(&self) -> Result<bool, StoreError>;

    fn set_emails_sent(&mut self, sent: bool) -> Result<(), StoreError>;

    fn start_date(&self) -> Result<Option<NaiveDate>, StoreError>;

    fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError>;
}
