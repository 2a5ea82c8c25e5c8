//! Greedy shift assignment and workload tallies.
//!
//! # Algorithm
//!
//! `AssignmentEngine` is a single greedy pass per day and shift, ordering
//! candidates by how far they are below their minimum target. It is not
//! optimal and may leave cells unfilled.
//!
//! # Tallies
//!
//! `sync_tallies` derives each employee's weekly actual count and OK/Check
//! status from the grid; `WorkloadStats` summarises the whole cycle.

mod assignment;
mod tally;

pub use assignment::{AssignmentEngine, AssignmentOutcome, WeekReport};
pub use tally::{count_week, sync_tallies, WorkloadStats};
