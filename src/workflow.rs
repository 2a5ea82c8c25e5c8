//! Cycle triggers.
//!
//! [`ShiftWorkflow`] connects the engine, validator and status resolver
//! to a [`ShiftStore`]. Each trigger reads what it needs from the store,
//! writes its results back and finishes with a status refresh:
//!
//! | Trigger | Effect |
//! |---------|--------|
//! | [`recompute_assignment`](ShiftWorkflow::recompute_assignment) | dedup responses, rebuild the grid |
//! | [`cell_edited`](ShiftWorkflow::cell_edited) | store a manual value |
//! | [`reset_cycle`](ShiftWorkflow::reset_cycle) | new start date, sentinel grid |
//! | [`notify_and_collect`](ShiftWorkflow::notify_and_collect) | send requests, clear responses |
//!
//! Every trigger re-syncs the roster tallies before validating, since
//! the green state depends on them.

use std::path::Path;

use rand::Rng;
use tracing::{error, info, warn};

use crate::config::CycleConfig;
use crate::error::{NotifyError, ShiftError, StoreError};
use crate::models::{
    dedup_latest, parse_start_date, CycleCalendar, Employee, RespondentSummary, ScheduleGrid,
};
use crate::scheduler::{sync_tallies, AssignmentEngine, WeekReport, WorkloadStats};
use crate::status::{resolve, StatusInputs, StatusReport};
use crate::store::{Notifier, ShiftStore};
use crate::validation::{validate_roster, ScheduleValidator};

/// Result of an assignment run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub weeks: Vec<WeekReport>,
    pub status: Vec<StatusReport>,
}

/// Result of a notification round.
#[derive(Debug, Clone)]
pub struct NotifyReport {
    /// Requests delivered.
    pub sent: usize,
    /// Requests that failed; the round carried on past them.
    pub failed: Vec<NotifyError>,
    pub status: Vec<StatusReport>,
}

/// Scheduling cycle bound to a store.
#[derive(Debug)]
pub struct ShiftWorkflow<S: ShiftStore> {
    config: CycleConfig,
    engine: AssignmentEngine,
    store: S,
}

impl<S: ShiftStore> ShiftWorkflow<S> {
    pub fn new(config: CycleConfig, store: S) -> Self {
        Self {
            engine: AssignmentEngine::new(config.clone()),
            config,
            store,
        }
    }

    /// Loads the configuration from a TOML file.
    pub fn from_config_file(path: &Path, store: S) -> Result<Self, ShiftError> {
        let config = CycleConfig::load(path)?;
        Ok(Self::new(config, store))
    }

    /// Replaces the assignment engine (custom ranking rules).
    pub fn with_engine(mut self, engine: AssignmentEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Rebuilds the whole grid from the latest responses.
    ///
    /// Returns `Ok(None)` without writing anything when there are no
    /// responses.
    pub fn recompute_assignment<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<RunReport>, ShiftError> {
        let submissions = dedup_latest(self.store.submissions()?);
        if submissions.is_empty() {
            info!("no responses yet, nothing to assign");
            return Ok(None);
        }
        self.store.replace_submissions(submissions.clone())?;

        let roster = self.store.roster()?;
        if let Err(problems) = validate_roster(&roster) {
            for problem in &problems {
                warn!(kind = ?problem.kind, "{}", problem.message);
            }
        }

        let Some(outcome) = self.engine.assign(&roster, &submissions, rng) else {
            return Ok(None);
        };
        for (week, cells) in outcome.grid.weeks.iter().enumerate() {
            self.store.save_week(week, cells)?;
        }

        self.sync_tallies()?;
        let status = self.refresh_status()?;
        Ok(Some(RunReport {
            weeks: outcome.weeks,
            status,
        }))
    }

    /// Stores a manual edit of one cell.
    ///
    /// The marker is dropped; the selection constraint and colour are
    /// kept until the refresh recolours the cell.
    pub fn cell_edited(
        &mut self,
        week: usize,
        row: usize,
        day: usize,
        value: &str,
    ) -> Result<Vec<StatusReport>, ShiftError> {
        let mut grid = self.store.grid()?;
        let cells = grid.week_mut(week).ok_or(StoreError::MissingWeek(week))?;
        let cell = cells
            .get_mut(row, day)
            .ok_or(StoreError::CellOutOfRange { week, row, day })?;
        cell.set_manual(value);
        self.store.save_week(week, cells)?;

        self.sync_tallies()?;
        self.refresh_status()
    }

    /// Starts a new cycle on `start_date` (`DD.MM.YYYY`).
    pub fn reset_cycle(&mut self, start_date: &str) -> Result<Vec<StatusReport>, ShiftError> {
        let start = parse_start_date(start_date)?;
        self.store.set_start_date(start)?;
        self.store.set_emails_sent(false)?;

        let mut grid = ScheduleGrid::new(&self.config);
        grid.reset(&self.config);
        for (week, cells) in grid.weeks.iter().enumerate() {
            self.store.save_week(week, cells)?;
        }
        info!(start = %start, "cycle reset");

        self.sync_tallies()?;
        self.refresh_status()
    }

    /// Sends the availability request to everyone with an email, then
    /// clears the collected responses.
    pub fn notify_and_collect<N: Notifier + ?Sized>(
        &mut self,
        notifier: &N,
    ) -> Result<NotifyReport, ShiftError> {
        let roster = self.store.roster()?;
        let mut sent = 0;
        let mut failed = Vec::new();

        for employee in roster.iter().filter(|e| e.has_email()) {
            match notifier.notify(employee) {
                Ok(()) => sent += 1,
                Err(e) => {
                    error!(name = %employee.name, error = %e, "notification failed");
                    failed.push(e);
                }
            }
        }
        info!(sent, failed = failed.len(), "availability requests sent");

        self.store.clear_submissions()?;
        self.store.set_emails_sent(true)?;
        let status = self.refresh_status()?;
        Ok(NotifyReport {
            sent,
            failed,
            status,
        })
    }

    /// Validates every week, writes the colours and resolves the status.
    pub fn refresh_status(&mut self) -> Result<Vec<StatusReport>, ShiftError> {
        let roster = self.store.roster()?;
        let mut grid = self.store.grid()?;
        let results = ScheduleValidator::new(&self.config, &roster).validate(&grid);

        let summary = RespondentSummary::from_submissions(&self.store.submissions()?);
        let inputs = StatusInputs::new(&summary, roster.len(), self.store.emails_sent()?);
        if !inputs.duplicates.is_empty() {
            warn!(duplicates = ?inputs.duplicates, "duplicate responses");
        }

        let mut reports = Vec::with_capacity(results.len());
        for result in &results {
            if let Some(cells) = grid.week_mut(result.week) {
                result.apply_to(cells);
                self.store.save_week(result.week, cells)?;
            }
            let report = resolve(result.week, &result.state, &inputs);
            info!(week = result.week + 1, status = %report.message, "week status");
            reports.push(report);
        }
        Ok(reports)
    }

    /// Recounts tallies from the stored grid and writes them back.
    pub fn sync_tallies(&mut self) -> Result<Vec<Employee>, ShiftError> {
        let mut roster = self.store.roster()?;
        let grid = self.store.grid()?;
        let checks = sync_tallies(&grid, &mut roster, &self.config);
        self.store.save_tallies(&roster)?;
        info!(employees = roster.len(), checks, "tallies synced");
        Ok(roster)
    }

    /// Cycle-wide workload per employee.
    pub fn workload(&self) -> Result<Vec<WorkloadStats>, ShiftError> {
        let roster = self.store.roster()?;
        let grid = self.store.grid()?;
        Ok(WorkloadStats::calculate(&grid, &roster, &self.config))
    }

    /// Calendar for the stored start date, if one is set.
    pub fn calendar(&self) -> Result<Option<CycleCalendar>, ShiftError> {
        Ok(self
            .store
            .start_date()?
            .map(|start| CycleCalendar::new(start, &self.config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellColor, StaffStatus, Submission};
    use crate::status::StatusMessage;
    use crate::error::ConfigError;
    use crate::store::{JsonFileStore, LogNotifier, MemoryStore, Workbook};
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use serde_json::json;
    use tempfile::tempdir;

    fn workflow(roster: Vec<Employee>, subs: Vec<Submission>) -> ShiftWorkflow<MemoryStore> {
        let config = CycleConfig::default();
        let book = Workbook::new(&config)
            .with_roster(roster)
            .with_submissions(subs);
        ShiftWorkflow::new(config, MemoryStore::new(book))
    }

    fn ts(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 20)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    struct FlakyNotifier;

    impl Notifier for FlakyNotifier {
        fn notify(&self, employee: &Employee) -> Result<(), NotifyError> {
            if employee.name == "B" {
                Err(NotifyError::Delivery {
                    recipient: employee.email.clone(),
                    reason: "mailbox full".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_fresh_cycle_status() {
        crate::logging::init_test();
        let roster = (0..5).map(|i| Employee::new(format!("E{i}"))).collect();
        let mut wf = workflow(roster, Vec::new());

        let status = wf.reset_cycle("22.02.2026").unwrap();
        assert_eq!(status.len(), 2);
        assert!(status.iter().all(|s| s.message == StatusMessage::FreshCycle));
        assert_eq!(
            wf.calendar().unwrap().unwrap().date_of(13),
            NaiveDate::from_ymd_opt(2026, 3, 7)
        );
    }

    #[test]
    fn test_reset_rejects_bad_date() {
        let mut wf = workflow(Vec::new(), Vec::new());
        let err = wf.reset_cycle("2026-02-22").unwrap_err();
        assert!(matches!(err, ShiftError::InvalidStartDate(_)));
        assert_eq!(wf.store().start_date().unwrap(), None);
    }

    #[test]
    fn test_recompute_without_responses_writes_nothing() {
        let mut wf = workflow(vec![Employee::new("A")], Vec::new());
        let before = wf.store().grid().unwrap();

        let mut rng = SmallRng::seed_from_u64(3);
        assert!(wf.recompute_assignment(&mut rng).unwrap().is_none());
        assert_eq!(wf.store().grid().unwrap(), before);
    }

    #[test]
    fn test_recompute_dedups_and_assigns() {
        crate::logging::init_test();
        let roster = vec![
            Employee::new("A").with_target("1"),
            Employee::new("B").with_target("1"),
        ];
        let subs = vec![
            Submission::new("A").at(ts(8)).with_day(0, "night"),
            Submission::new("B").at(ts(9)).with_day(0, "morning"),
            Submission::new("A").at(ts(10)).with_day(0, "morning"),
        ];
        let mut wf = workflow(roster, subs);

        let report = wf
            .recompute_assignment(&mut SmallRng::seed_from_u64(7))
            .unwrap()
            .unwrap();
        assert_eq!(wf.store().submissions().unwrap().len(), 2);
        assert_eq!(report.weeks[0].placed, 2);

        let config = wf.config().clone();
        let names = wf.store().grid().unwrap().names_on(0, &config);
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"A".to_string()) && names.contains(&"B".to_string()));

        let roster = wf.store().roster().unwrap();
        assert_eq!(roster[0].status_for_week(0), Some(StaffStatus::Ok));
        // Week two is empty, so targets of 1 are missed there
        assert_eq!(roster[0].status_for_week(1), Some(StaffStatus::Check));
        // Every other cell holds the sentinel, so a satisfied week is complete
        assert_eq!(report.status[0].message, StatusMessage::Finished);
        assert_eq!(report.status[1].message, StatusMessage::DataReady);
    }

    #[test]
    fn test_cell_edit_flags_unknown_name() {
        let mut wf = workflow(vec![Employee::new("A")], Vec::new());
        wf.reset_cycle("01.03.2026").unwrap();

        let status = wf.cell_edited(1, 2, 4, "Zed").unwrap();
        assert_eq!(status[1].message, StatusMessage::NameError);
        assert_eq!(status[0].message, StatusMessage::FreshCycle);

        let grid = wf.store().grid().unwrap();
        assert_eq!(grid.weeks[1].get(2, 4).unwrap().background, CellColor::Error);
    }

    #[test]
    fn test_cell_edit_out_of_range() {
        let mut wf = workflow(Vec::new(), Vec::new());
        assert!(matches!(
            wf.cell_edited(0, 9, 0, "A"),
            Err(ShiftError::Store(StoreError::CellOutOfRange { row: 9, .. }))
        ));
        assert!(matches!(
            wf.cell_edited(4, 0, 0, "A"),
            Err(ShiftError::Store(StoreError::MissingWeek(4)))
        ));
    }

    #[test]
    fn test_cell_edit_syncs_tallies() {
        let mut wf = workflow(vec![Employee::new("A").with_target("1")], Vec::new());
        wf.reset_cycle("01.03.2026").unwrap();
        wf.cell_edited(0, 0, 0, "A").unwrap();

        let roster = wf.store().roster().unwrap();
        assert_eq!(roster[0].weeks[0].actual, 1);
        assert_eq!(roster[0].status_for_week(0), Some(StaffStatus::Ok));
        assert_eq!(wf.workload().unwrap()[0].total, 1);
    }

    #[test]
    fn test_notify_continues_past_failures() {
        let roster = vec![
            Employee::new("A").with_email("a@example.com"),
            Employee::new("B").with_email("b@example.com"),
            Employee::new("C"),
            Employee::new("D").with_email("d@example.com"),
        ];
        let subs = vec![Submission::new("A"), Submission::new("A")];
        let mut wf = workflow(roster, subs);

        let report = wf.notify_and_collect(&FlakyNotifier).unwrap();
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed.len(), 1);
        assert!(wf.store().submissions().unwrap().is_empty());
        assert!(wf.store().emails_sent().unwrap());
        assert_eq!(
            report.status[0].message,
            StatusMessage::WaitingForResponses { received: 0, total: 4 }
        );
        assert_eq!(report.status[0].duplicate_warning, None);
    }

    #[test]
    fn test_duplicates_reported_until_recompute() {
        let subs = vec![
            Submission::new("A").at(ts(8)),
            Submission::new("A").at(ts(9)),
        ];
        let mut wf = workflow(vec![Employee::new("A"), Employee::new("B")], subs);

        let status = wf.refresh_status().unwrap();
        assert_eq!(
            status[0].duplicate_warning.as_deref(),
            Some("Duplicate responses: A")
        );
        assert_eq!(status[0].message, StatusMessage::FreshCycle);
    }

    #[test]
    fn test_log_notifier() {
        let mut wf = workflow(vec![Employee::new("A").with_email("a@example.com")], Vec::new());
        let notifier = LogNotifier::new().with_form_url("https://forms.example.com/x");
        let report = wf.notify_and_collect(&notifier).unwrap();
        assert_eq!(report.sent, 1);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_hand_edited_roster_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cycle.json");
        let config = CycleConfig::default();

        let mut doc = serde_json::to_value(Workbook::new(&config)).unwrap();
        doc["roster"] = json!([{ "name": "Dana ", "email": "", "target": "1" }]);
        doc["submissions"] = json!([{ "submitted_at": null, "name": "Dana", "days": ["morning"] }]);
        std::fs::write(&path, doc.to_string()).unwrap();

        let store = JsonFileStore::open(&path, &config).unwrap();
        let mut wf = ShiftWorkflow::new(config, store);
        let report = wf
            .recompute_assignment(&mut SmallRng::seed_from_u64(11))
            .unwrap()
            .unwrap();

        assert_ne!(report.status[0].message, StatusMessage::NameError);
        assert_eq!(report.status[0].message, StatusMessage::Finished);
        let roster = wf.store().roster().unwrap();
        assert_eq!(roster[0].name, "Dana");
        assert_eq!(roster[0].status_for_week(0), Some(StaffStatus::Ok));

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains(r#""target": "1""#));
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.toml");
        let bad = dir.path().join("bad.toml");
        std::fs::write(&good, "weeks = 1\n").unwrap();
        std::fs::write(&bad, "days_per_week = 0\n").unwrap();
        let store = || MemoryStore::new(Workbook::new(&CycleConfig::default()));

        let wf = ShiftWorkflow::from_config_file(&good, store()).unwrap();
        assert_eq!(wf.config().total_days(), 7);

        let err = ShiftWorkflow::from_config_file(&bad, store()).unwrap_err();
        assert!(matches!(err, ShiftError::Config(ConfigError::Invalid(_))));

        let missing = dir.path().join("missing.toml");
        let err = ShiftWorkflow::from_config_file(&missing, store()).unwrap_err();
        assert!(matches!(err, ShiftError::Config(ConfigError::Read { .. })));
    }

    #[test]
    fn test_refresh_idempotent() {
        let mut wf = workflow(vec![Employee::new("A")], Vec::new());
        wf.reset_cycle("01.03.2026").unwrap();
        wf.cell_edited(0, 0, 0, "A").unwrap();
        wf.cell_edited(0, 2, 0, "A").unwrap();

        let first = wf.refresh_status().unwrap();
        let grid = wf.store().grid().unwrap();
        let second = wf.refresh_status().unwrap();
        assert_eq!(first, second);
        assert_eq!(wf.store().grid().unwrap(), grid);
        assert_eq!(first[0].message, StatusMessage::DoubleShift);
    }
}
