use chrono::NaiveDate;

use super::{ShiftStore, Workbook};
use crate::error::StoreError;
use crate::models::{Employee, ScheduleGrid, Submission, WeekGrid};

/// In-memory store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    book: Workbook,
}

impl MemoryStore {
    pub fn new(book: Workbook) -> Self {
        Self { book }
    }

    pub fn workbook(&self) -> &Workbook {
        &self.book
    }

    pub fn into_workbook(self) -> Workbook {
        self.book
    }
}

impl ShiftStore for MemoryStore {
    fn roster(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.book.roster.clone())
    }

    fn save_tallies(&mut self, roster: &[Employee]) -> Result<(), StoreError> {
        self.book.apply_tallies(roster);
        Ok(())
    }

    fn submissions(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.book.submissions.clone())
    }

    fn replace_submissions(&mut self, submissions: Vec<Submission>) -> Result<(), StoreError> {
        self.book.submissions = submissions;
        Ok(())
    }

    fn grid(&self) -> Result<ScheduleGrid, StoreError> {
        Ok(self.book.grid.clone())
    }

    fn save_week(&mut self, week: usize, cells: &WeekGrid) -> Result<(), StoreError> {
        self.book.write_week(week, cells)
    }

    fn emails_sent(&self) -> Result<bool, StoreError> {
        Ok(self.book.emails_sent)
    }

    fn set_emails_sent(&mut self, sent: bool) -> Result<(), StoreError> {
        self.book.emails_sent = sent;
        Ok(())
    }

    fn start_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.book.start_date)
    }

    fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.book.start_date = Some(date);
        Ok(())
    }
}
