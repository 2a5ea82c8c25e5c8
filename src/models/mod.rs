//! Rostering domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Employee` / `TargetSpec` | Roster row and its weekly shift target |
//! | `Submission` | One employee's availability for the cycle |
//! | `ShiftType` | Morning, afternoon, night |
//! | `ScheduleGrid` / `WeekGrid` / `GridCell` | The assignment grid |
//! | `CycleCalendar` | Dates of the cycle's days |

mod calendar;
mod employee;
mod grid;
mod shift;
mod submission;

pub use calendar::{format_start_date, parse_start_date, CycleCalendar};
pub use employee::{Employee, StaffStatus, TargetSpec, WeekTally};
pub use grid::{CellColor, CellValue, GridCell, ScheduleGrid, WeekGrid};
pub use shift::ShiftType;
pub use submission::{dedup_latest, RespondentSummary, Submission};
