//! Error types for the configuration, store and notification seams.
//!
//! The assignment engine, validator and status resolver do not fail:
//! bad input is reported as data. Only I/O-facing code returns these.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tabular store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("week {0} does not exist in the grid")]
    MissingWeek(usize),

    #[error("cell out of range: week={week}, row={row}, day={day}")]
    CellOutOfRange { week: usize, row: usize, day: usize },
}

/// A single notification that could not be delivered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum ShiftError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid start date {0:?}, expected DD.MM.YYYY")]
    InvalidStartDate(String),
}
