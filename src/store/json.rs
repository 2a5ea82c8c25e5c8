//! JSON file store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::{ShiftStore, Workbook};
use crate::config::CycleConfig;
use crate::error::StoreError;
use crate::models::{Employee, ScheduleGrid, Submission, WeekGrid};

/// A [`Workbook`] kept in a pretty-printed JSON file.
///
/// Reads are served from memory. Every mutation rewrites the whole file
/// before returning.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    book: Workbook,
}

impl JsonFileStore {
    /// Opens an existing file, or creates one holding an empty workbook.
    pub fn open(path: impl Into<PathBuf>, config: &CycleConfig) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let book = serde_json::from_str(&content)?;
            debug!(path = %path.display(), "opened workbook");
            Ok(Self { path, book })
        } else {
            Self::create(path, Workbook::new(config))
        }
    }

    /// Writes `book` to `path`, replacing any existing file.
    pub fn create(path: impl Into<PathBuf>, book: Workbook) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            book,
        };
        store.flush()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn workbook(&self) -> &Workbook {
        &self.book
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.book)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn mutate<F>(&mut self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Workbook) -> Result<(), StoreError>,
    {
        f(&mut self.book)?;
        self.flush()
    }
}

impl ShiftStore for JsonFileStore {
    fn roster(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.book.roster.clone())
    }

    fn save_tallies(&mut self, roster: &[Employee]) -> Result<(), StoreError> {
        self.mutate(|book| {
            book.apply_tallies(roster);
            Ok(())
        })
    }

    fn submissions(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.book.submissions.clone())
    }

    fn replace_submissions(&mut self, submissions: Vec<Submission>) -> Result<(), StoreError> {
        self.mutate(|book| {
            book.submissions = submissions;
            Ok(())
        })
    }

    fn grid(&self) -> Result<ScheduleGrid, StoreError> {
        Ok(self.book.grid.clone())
    }

    fn save_week(&mut self, week: usize, cells: &WeekGrid) -> Result<(), StoreError> {
        self.mutate(|book| book.write_week(week, cells))
    }

    fn emails_sent(&self) -> Result<bool, StoreError> {
        Ok(self.book.emails_sent)
    }

    fn set_emails_sent(&mut self, sent: bool) -> Result<(), StoreError> {
        self.mutate(|book| {
            book.emails_sent = sent;
            Ok(())
        })
    }

    fn start_date(&self) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.book.start_date)
    }

    fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        self.mutate(|book| {
            book.start_date = Some(date);
            Ok(())
        })
    }
}
