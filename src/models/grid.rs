//! Assignment grid model.
//!
//! Each week is a matrix of slot-rows × days. Row blocks follow
//! [`ShiftType::ALL`](super::ShiftType::ALL): with two slots per shift,
//! rows 0–1 are morning, 2–3 afternoon, 4–5 night.
//!
//! A cell stores its raw text the way the grid store does. Engine-written
//! names carry a hidden marker character so they can be told apart from
//! manual edits; [`GridCell::value`] strips it.

use serde::{Deserialize, Serialize};

use crate::config::CycleConfig;

/// Background class of a cell. The theme maps it to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellColor {
    #[default]
    Default,
    Valid,
    Warning,
    Error,
    Success,
}

/// One grid cell as held by the grid store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Stored text, possibly carrying the auto-assignment marker.
    pub raw: String,
    /// Selection constraint offered to a human editor.
    pub choices: Option<Vec<String>>,
    /// Last background applied by validation.
    pub background: CellColor,
}

/// Parsed view of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Nothing entered.
    Blank,
    /// The sentinel: deliberately left without a worker.
    Unconstrained,
    /// A worker name; `auto` when written by the engine.
    Name { name: String, auto: bool },
}

impl GridCell {
    /// A cell holding the sentinel.
    pub fn unconstrained(config: &CycleConfig) -> Self {
        Self {
            raw: config.empty_cell.clone(),
            choices: None,
            background: CellColor::Default,
        }
    }

    /// An engine-written name.
    pub fn auto(name: &str, config: &CycleConfig, choices: Option<Vec<String>>) -> Self {
        Self {
            raw: format!("{name}{}", config.auto_marker),
            choices,
            background: CellColor::Default,
        }
    }

    /// Replaces the text with a manual entry, keeping choices and colour.
    pub fn set_manual(&mut self, value: impl Into<String>) {
        self.raw = value.into();
    }

    /// Text with the marker removed and whitespace trimmed.
    pub fn clean(&self, config: &CycleConfig) -> String {
        self.raw.replace(config.auto_marker, "").trim().to_string()
    }

    /// Whether the engine wrote this cell.
    pub fn is_auto(&self, config: &CycleConfig) -> bool {
        self.raw.contains(config.auto_marker)
    }

    /// Parses the cell.
    pub fn value(&self, config: &CycleConfig) -> CellValue {
        let clean = self.clean(config);
        if clean.is_empty() {
            CellValue::Blank
        } else if clean == config.empty_cell {
            CellValue::Unconstrained
        } else {
            CellValue::Name {
                name: clean,
                auto: self.is_auto(config),
            }
        }
    }

    /// Number of choices in the attached selection constraint.
    pub fn choice_count(&self) -> usize {
        self.choices.as_ref().map_or(0, Vec::len)
    }
}

impl CellValue {
    /// The worker name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// One week of cells, `rows × days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    cells: Vec<Vec<GridCell>>,
}

impl WeekGrid {
    /// Creates a blank week.
    pub fn new(rows: usize, days: usize) -> Self {
        Self {
            cells: vec![vec![GridCell::default(); days]; rows],
        }
    }

    /// Creates a blank week sized by the config.
    pub fn for_config(config: &CycleConfig) -> Self {
        Self::new(config.rows_per_week(), config.days_per_week)
    }

    /// Number of slot-rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of day columns.
    pub fn days(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, day: usize) -> Option<&GridCell> {
        self.cells.get(row).and_then(|r| r.get(day))
    }

    pub fn get_mut(&mut self, row: usize, day: usize) -> Option<&mut GridCell> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(day))
    }

    /// Overwrites a cell. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, day: usize, cell: GridCell) {
        if let Some(slot) = self.get_mut(row, day) {
            *slot = cell;
        }
    }

    /// Iterates cells with their `(row, day)` position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(d, c)| (r, d, c)))
    }

    /// Clean names in the night rows of a day (blank and sentinel included as text).
    pub fn night_pair(&self, day: usize, config: &CycleConfig) -> Vec<String> {
        config
            .rows_for(super::ShiftType::Night)
            .filter_map(|row| self.get(row, day))
            .map(|cell| cell.clean(config))
            .collect()
    }

    /// Sets every cell to the sentinel with no choices and default colour.
    pub fn reset(&mut self, config: &CycleConfig) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = GridCell::unconstrained(config);
            }
        }
    }
}

/// The full cycle grid: one [`WeekGrid`] per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    pub weeks: Vec<WeekGrid>,
}

impl ScheduleGrid {
    /// Creates a blank grid sized by the config.
    pub fn new(config: &CycleConfig) -> Self {
        Self {
            weeks: (0..config.weeks).map(|_| WeekGrid::for_config(config)).collect(),
        }
    }

    pub fn week(&self, week: usize) -> Option<&WeekGrid> {
        self.weeks.get(week)
    }

    pub fn week_mut(&mut self, week: usize) -> Option<&mut WeekGrid> {
        self.weeks.get_mut(week)
    }

    /// Cell at a global day and row.
    pub fn cell_at(&self, global_day: usize, row: usize, config: &CycleConfig) -> Option<&GridCell> {
        let (week, day) = config.locate_day(global_day);
        self.week(week).and_then(|w| w.get(row, day))
    }

    /// Mutable cell at a global day and row.
    pub fn cell_at_mut(
        &mut self,
        global_day: usize,
        row: usize,
        config: &CycleConfig,
    ) -> Option<&mut GridCell> {
        let (week, day) = config.locate_day(global_day);
        self.week_mut(week).and_then(|w| w.get_mut(row, day))
    }

    /// Resets every week to the sentinel.
    pub fn reset(&mut self, config: &CycleConfig) {
        for week in &mut self.weeks {
            week.reset(config);
        }
    }

    /// Clean names of every cell on a global day, top to bottom.
    pub fn names_on(&self, global_day: usize, config: &CycleConfig) -> Vec<String> {
        (0..config.rows_per_week())
            .filter_map(|row| self.cell_at(global_day, row, config))
            .filter_map(|cell| cell.value(config).name().map(str::to_string))
            .collect()
    }
}
