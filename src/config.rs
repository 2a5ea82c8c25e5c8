//! Cycle configuration.
//!
//! Grid geometry, shift labels, the sentinel and marker conventions and
//! the colour theme. A `CycleConfig` is built once (usually from TOML)
//! and handed to every component; nothing reads configuration from
//! global state.
//!
//! # Example
//!
//! ```
//! use u_shift::config::CycleConfig;
//!
//! let config = CycleConfig::from_toml_str(
//!     r#"
//! empty_cell = "אין אילוץ"
//!
//! [labels]
//! morning = "בוקר"
//! afternoon = "צהריים"
//! night = "לילה"
//! "#,
//! )
//! .unwrap();
//! assert_eq!(config.total_days(), 14);
//! assert_eq!(config.labels.night, "לילה");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::ShiftType;

/// Immutable configuration for one scheduling cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Number of weeks in a cycle.
    pub weeks: usize,
    /// Days per week (grid columns).
    pub days_per_week: usize,
    /// Interchangeable slot-rows per shift type.
    pub slots_per_shift: usize,
    /// Labels used by availability submissions for each shift type.
    pub labels: ShiftLabels,
    /// Sentinel text for a deliberately unconstrained cell.
    pub empty_cell: String,
    /// Hidden marker appended to engine-written names.
    pub auto_marker: char,
    /// An auto-assigned cell offering more choices than this is flagged for review.
    pub ambiguity_threshold: usize,
    /// Columns counted as weekend by workload stats (0-based within a week).
    pub weekend_day: usize,
    /// Colour theme.
    pub theme: Theme,
}

/// Submission labels for the three shift types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftLabels {
    pub morning: String,
    pub afternoon: String,
    pub night: String,
}

/// Background/text/border colours for one theme entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub bg: String,
    pub txt: String,
    pub border: String,
}

/// Colour theme for cells and status boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub default: Swatch,
    pub valid: Swatch,
    pub error: Swatch,
    pub success: Swatch,
    pub warning: Swatch,
    pub info: Swatch,
}

impl Swatch {
    fn new(bg: &str, txt: &str, border: &str) -> Self {
        Self {
            bg: bg.to_string(),
            txt: txt.to_string(),
            border: border.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            default: Swatch::new("#f8f9fa", "#5f6368", "#dadce0"),
            valid: Swatch::new("#e7f3ff", "#1a73e8", "#aecbfa"),
            error: Swatch::new("#fce8e6", "#d93025", "#fad2cf"),
            success: Swatch::new("#e6f4ea", "#1e8e3e", "#ceead6"),
            warning: Swatch::new("#fef7e0", "#ea8600", "#feefc3"),
            info: Swatch::new("#f1f3f4", "#3c4043", "#bdc1c6"),
        }
    }
}

impl Default for ShiftLabels {
    fn default() -> Self {
        Self {
            morning: "morning".to_string(),
            afternoon: "afternoon".to_string(),
            night: "night".to_string(),
        }
    }
}

impl ShiftLabels {
    /// Label for a shift type.
    pub fn label(&self, shift: ShiftType) -> &str {
        match shift {
            ShiftType::Morning => &self.morning,
            ShiftType::Afternoon => &self.afternoon,
            ShiftType::Night => &self.night,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            weeks: 2,
            days_per_week: 7,
            slots_per_shift: 2,
            labels: ShiftLabels::default(),
            empty_cell: "no constraint".to_string(),
            auto_marker: '\u{200B}',
            ambiguity_threshold: 2,
            weekend_day: 6,
            theme: Theme::default(),
        }
    }
}

impl CycleConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks geometry and label invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weeks == 0 || self.days_per_week == 0 || self.slots_per_shift == 0 {
            return Err(ConfigError::Invalid(
                "weeks, days_per_week and slots_per_shift must be positive".into(),
            ));
        }
        if self.weekend_day >= self.days_per_week {
            return Err(ConfigError::Invalid(format!(
                "weekend_day {} is outside a {}-day week",
                self.weekend_day, self.days_per_week
            )));
        }
        if self.empty_cell.trim().is_empty() {
            return Err(ConfigError::Invalid("empty_cell sentinel is blank".into()));
        }

        let labels: Vec<&str> = ShiftType::ALL
            .iter()
            .map(|&s| self.labels.label(s).trim())
            .collect();
        if labels.iter().any(|l| l.is_empty()) {
            return Err(ConfigError::Invalid("shift labels must not be blank".into()));
        }
        if labels[0] == labels[1] || labels[0] == labels[2] || labels[1] == labels[2] {
            return Err(ConfigError::Invalid("shift labels must be distinct".into()));
        }
        Ok(())
    }

    /// Days in a full cycle.
    #[inline]
    pub fn total_days(&self) -> usize {
        self.weeks * self.days_per_week
    }

    /// Slot-rows per week grid.
    #[inline]
    pub fn rows_per_week(&self) -> usize {
        ShiftType::ALL.len() * self.slots_per_shift
    }

    /// Grid rows belonging to a shift type.
    pub fn rows_for(&self, shift: ShiftType) -> std::ops::Range<usize> {
        let start = shift.index() * self.slots_per_shift;
        start..start + self.slots_per_shift
    }

    /// Shift type owning a grid row.
    pub fn shift_of_row(&self, row: usize) -> Option<ShiftType> {
        ShiftType::ALL.get(row / self.slots_per_shift).copied()
    }

    /// Splits a global day index into `(week, day_of_week)`.
    pub fn locate_day(&self, global_day: usize) -> (usize, usize) {
        (
            global_day / self.days_per_week,
            global_day % self.days_per_week,
        )
    }
}
