//! Bi-weekly shift rostering from availability responses.
//!
//! Employees submit, per day of a two-week cycle, which shift types they
//! can work. This crate turns those responses into a filled grid with a
//! greedy deficit-driven assignment, then validates the grid against the
//! hard rules and resolves a per-week status for whoever keeps the roster.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `TargetSpec`, `Submission`,
//!   `GridCell`, `WeekGrid`, `ScheduleGrid`, `CycleCalendar`
//! - **`availability`**: Candidate pools per day and shift type
//! - **`dispatching`**: `DeficitTracker` and the candidate ranking rules
//! - **`scheduler`**: `AssignmentEngine`, weekly tallies, workload stats
//! - **`validation`**: Grid scan (unknown names, double shifts,
//!   night-then-morning) and roster integrity checks
//! - **`status`**: Per-week status message with fixed precedence
//! - **`store`**: Storage and notification seams
//! - **`workflow`**: The cycle triggers wired to a store
//!
//! # Data Flow
//!
//! responses → `AvailabilityIndex` → `AssignmentEngine` (ranking through
//! `DeficitTracker`) → grid → `ScheduleValidator` → `status::resolve`
//!
//! # Hard Rules
//!
//! - A worker holds at most one cell per day.
//! - A worker on a night shift is not placed on the next morning.
//! - Only roster names may appear in the grid.
//!
//! Per-employee targets are soft: the engine favours whoever is furthest
//! below their minimum, and the weekly tally reports `OK`/`Check`.

pub mod availability;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod status;
pub mod store;
pub mod validation;
pub mod workflow;
