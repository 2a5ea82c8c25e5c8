//! Schedule and roster validation.
//!
//! The schedule validator scans each week column by column (days left to
//! right, rows top to bottom) and classifies every cell. A cell is given
//! at most one error, checked in this order:
//! - unknown name (not on the roster)
//! - double shift (name already seen earlier that day)
//! - night then morning (morning row, name on the previous day's night rows;
//!   for a week's first day the previous week's last night is passed in)
//!
//! Errors are reported, never corrected. The week's aggregate
//! [`ValidationState`] drives the status message and the cell colours.
//!
//! Roster validation checks the staff list itself before scheduling:
//! blank names, duplicate names and target specs that do not parse.

use std::collections::HashSet;

use crate::config::CycleConfig;
use crate::models::{CellColor, CellValue, Employee, ScheduleGrid, ShiftType, StaffStatus, WeekGrid};

/// Aggregate flags for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationState {
    /// No cell holds a name.
    pub is_empty: bool,
    pub has_name_error: bool,
    pub has_double_shift: bool,
    pub has_night_morning: bool,
    /// Some cell is blank (the sentinel does not count).
    pub has_empty_cells: bool,
    /// Every roster employee's stored status for this week is OK.
    pub staff_status_ok: bool,
    /// Fully valid and complete.
    pub should_be_green: bool,
}

/// Classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Blank,
    Unconstrained,
    Valid,
    NameError,
    DoubleShift,
    NightMorning,
}

/// Validation result for one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekValidation {
    pub week: usize,
    pub state: ValidationState,
    /// `classes[row][day]`.
    pub classes: Vec<Vec<CellClass>>,
    /// `colors[row][day]`.
    pub colors: Vec<Vec<CellColor>>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            is_empty: true,
            has_name_error: false,
            has_double_shift: false,
            has_night_morning: false,
            has_empty_cells: false,
            staff_status_ok: false,
            should_be_green: false,
        }
    }
}

impl ValidationState {
    /// Whether any hard-rule error was found.
    pub fn has_errors(&self) -> bool {
        self.has_name_error || self.has_double_shift || self.has_night_morning
    }

    fn finish(&mut self) {
        self.should_be_green =
            !self.is_empty && self.staff_status_ok && !self.has_empty_cells && !self.has_errors();
    }
}

impl CellClass {
    pub fn is_error(self) -> bool {
        matches!(self, Self::NameError | Self::DoubleShift | Self::NightMorning)
    }
}

impl WeekValidation {
    /// Writes the computed colours into the week's cells.
    pub fn apply_to(&self, week: &mut WeekGrid) {
        for (row, colors) in self.colors.iter().enumerate() {
            for (day, &color) in colors.iter().enumerate() {
                if let Some(cell) = week.get_mut(row, day) {
                    cell.background = color;
                }
            }
        }
    }

    /// Positions of cells flagged with an error.
    pub fn errors(&self) -> Vec<(usize, usize, CellClass)> {
        let mut found = Vec::new();
        for (row, classes) in self.classes.iter().enumerate() {
            for (day, &class) in classes.iter().enumerate() {
                if class.is_error() {
                    found.push((row, day, class));
                }
            }
        }
        found
    }
}

/// Scans schedule grids against a roster.
#[derive(Debug)]
pub struct ScheduleValidator<'a> {
    config: &'a CycleConfig,
    roster: &'a [Employee],
    names: HashSet<&'a str>,
}

impl<'a> ScheduleValidator<'a> {
    pub fn new(config: &'a CycleConfig, roster: &'a [Employee]) -> Self {
        Self {
            config,
            roster,
            names: roster.iter().map(|e| e.name.as_str()).collect(),
        }
    }

    /// Validates every week, chaining each week's last night into the next.
    pub fn validate(&self, grid: &ScheduleGrid) -> Vec<WeekValidation> {
        let mut previous_night: Vec<String> = Vec::new();
        let mut results = Vec::with_capacity(grid.weeks.len());

        for (week, cells) in grid.weeks.iter().enumerate() {
            results.push(self.validate_week(week, cells, &previous_night));
            previous_night = match cells.days().checked_sub(1) {
                Some(last_day) => cells.night_pair(last_day, self.config),
                None => Vec::new(),
            };
        }
        results
    }

    /// Validates one week.
    ///
    /// `previous_night` holds the clean night-row values of the day before
    /// this week's first day (empty for the first week of a cycle).
    pub fn validate_week(
        &self,
        week: usize,
        cells: &WeekGrid,
        previous_night: &[String],
    ) -> WeekValidation {
        let config = self.config;
        let rows = cells.rows();
        let days = cells.days();
        let morning = config.rows_for(ShiftType::Morning);

        let mut state = ValidationState {
            staff_status_ok: self.staff_status_ok(week),
            ..ValidationState::default()
        };
        let mut classes = vec![vec![CellClass::Blank; days]; rows];

        for day in 0..days {
            let mut seen_today: Vec<String> = Vec::new();
            let night_before: Vec<String> = if day > 0 {
                cells.night_pair(day - 1, config)
            } else {
                previous_night.to_vec()
            };

            for row in 0..rows {
                let Some(cell) = cells.get(row, day) else {
                    continue;
                };
                let name = match cell.value(config) {
                    CellValue::Blank => {
                        state.has_empty_cells = true;
                        continue;
                    }
                    CellValue::Unconstrained => {
                        classes[row][day] = CellClass::Unconstrained;
                        continue;
                    }
                    CellValue::Name { name, .. } => name,
                };

                state.is_empty = false;
                let class = if !self.names.contains(name.as_str()) {
                    state.has_name_error = true;
                    CellClass::NameError
                } else if seen_today.contains(&name) {
                    state.has_double_shift = true;
                    CellClass::DoubleShift
                } else if morning.contains(&row) && night_before.contains(&name) {
                    state.has_night_morning = true;
                    CellClass::NightMorning
                } else {
                    CellClass::Valid
                };
                classes[row][day] = class;
                seen_today.push(name);
            }
        }

        state.finish();
        let colors = self.colors(cells, &classes, &state);
        WeekValidation {
            week,
            state,
            classes,
            colors,
        }
    }

    fn staff_status_ok(&self, week: usize) -> bool {
        self.roster
            .iter()
            .all(|e| e.status_for_week(week) == Some(StaffStatus::Ok))
    }

    fn colors(
        &self,
        cells: &WeekGrid,
        classes: &[Vec<CellClass>],
        state: &ValidationState,
    ) -> Vec<Vec<CellColor>> {
        classes
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.iter()
                    .enumerate()
                    .map(|(day, &class)| match class {
                        c if c.is_error() => CellColor::Error,
                        _ if state.should_be_green => CellColor::Success,
                        CellClass::Blank | CellClass::Unconstrained => CellColor::Default,
                        _ => {
                            let ambiguous = cells.get(row, day).is_some_and(|cell| {
                                cell.is_auto(self.config)
                                    && cell.choice_count() > self.config.ambiguity_threshold
                            });
                            if ambiguous {
                                CellColor::Warning
                            } else {
                                CellColor::Valid
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Roster validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A roster validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of roster validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A roster row has no name.
    BlankName,
    /// Two roster rows share a name.
    DuplicateName,
    /// A target is neither an integer nor a `min-max` range.
    MalformedTarget,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks the roster before scheduling.
///
/// Scheduling still works with a flawed roster (a malformed target simply
/// ranks last), but these problems should be surfaced to whoever keeps
/// the staff list.
pub fn validate_roster(roster: &[Employee]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, employee) in roster.iter().enumerate() {
        if employee.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                format!("Roster row {} has no name", i + 1),
            ));
            continue;
        }
        if !seen.insert(employee.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate roster name: {}", employee.name),
            ));
        }
        if employee.target.is_malformed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedTarget,
                format!(
                    "Employee '{}' has unreadable target '{}'",
                    employee.name, employee.target
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
