//! Deficit-driven greedy shift assignment.
//!
//! # Algorithm
//!
//! For each week independently:
//! 1. Reset running counts to zero for every respondent.
//! 2. For each day, each shift type (morning, afternoon, night) and each
//!    slot-row of that shift:
//!    - take the day/shift candidate pool,
//!    - drop anyone already placed that day,
//!    - for morning, drop anyone on the previous day's night shift
//!      (day indices are global, so week two's first morning checks
//!      week one's last night),
//!    - shuffle, then stable-sort by deficit (desc) and count (asc),
//!    - place the first candidate, or write the sentinel if none remain.
//!
//! Single pass, no backtracking, no feasibility guarantee. Ties are broken
//! randomly, so two runs over the same input may differ.
//!
//! # Complexity
//! O(d * s * p log p) where d=days, s=slots per day, p=pool size.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::{debug, info};

use crate::availability::AvailabilityIndex;
use crate::config::CycleConfig;
use crate::dispatching::{DeficitTracker, RuleEngine};
use crate::models::{Employee, GridCell, ScheduleGrid, ShiftType, Submission};

/// Per-week summary of an assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekReport {
    /// Cells that received a worker.
    pub placed: usize,
    /// Cells left at the sentinel.
    pub unfilled: usize,
    /// Shifts placed per respondent this week.
    pub counts: HashMap<String, u32>,
}

/// Result of a full assignment run.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// The freshly computed grid (every cell written).
    pub grid: ScheduleGrid,
    /// One report per week.
    pub weeks: Vec<WeekReport>,
}

/// Greedy assignment engine.
///
/// # Example
///
/// ```
/// use u_shift::config::CycleConfig;
/// use u_shift::models::{Employee, Submission};
/// use u_shift::scheduler::AssignmentEngine;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let roster = vec![Employee::new("Noa").with_target("1")];
/// let subs = vec![Submission::new("Noa").with_day(0, "morning")];
/// let engine = AssignmentEngine::new(CycleConfig::default());
///
/// let outcome = engine.assign(&roster, &subs, &mut SmallRng::seed_from_u64(1)).unwrap();
/// assert_eq!(outcome.weeks[0].placed, 1);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: CycleConfig,
    rule_engine: RuleEngine,
}

impl AssignmentEngine {
    /// Creates an engine ranking by deficit, then load.
    pub fn new(config: CycleConfig) -> Self {
        Self {
            config,
            rule_engine: RuleEngine::deficit_first(),
        }
    }

    /// Replaces the ranking rules.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Runs the assignment over every week.
    ///
    /// Returns `None` when no submission has a name: there is nothing to
    /// assign and the existing grid should be left alone.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        roster: &[Employee],
        submissions: &[Submission],
        rng: &mut R,
    ) -> Option<AssignmentOutcome> {
        let config = &self.config;
        let index = AvailabilityIndex::build(submissions, config.total_days());
        if index.is_empty() {
            info!("no submissions, assignment skipped");
            return None;
        }

        let mut grid = ScheduleGrid::new(config);
        let mut placed_on: Vec<HashSet<String>> = vec![HashSet::new(); config.total_days()];
        let mut nights: Vec<HashSet<String>> = vec![HashSet::new(); config.total_days()];
        let mut tracker = DeficitTracker::new(roster);
        let mut weeks = Vec::with_capacity(config.weeks);

        for week in 0..config.weeks {
            tracker.reset(index.respondents());
            let mut report = WeekReport::default();

            for day in 0..config.days_per_week {
                let global_day = week * config.days_per_week + day;

                for shift in ShiftType::ALL {
                    let pool = index.candidates(global_day, config.labels.label(shift));

                    for row in config.rows_for(shift) {
                        let mut eligible: Vec<String> = pool
                            .iter()
                            .filter(|name| !placed_on[global_day].contains(*name))
                            .filter(|name| {
                                shift != ShiftType::Morning
                                    || global_day == 0
                                    || !nights[global_day - 1].contains(*name)
                            })
                            .cloned()
                            .collect();
                        self.rule_engine
                            .shuffle_and_rank(&mut eligible, &tracker, rng);

                        let cell = match eligible.into_iter().next() {
                            Some(name) => {
                                debug!(
                                    global_day,
                                    ?shift,
                                    row,
                                    name = %name,
                                    deficit = ?tracker.deficit(&name),
                                    pool = pool.len(),
                                    "placed"
                                );
                                tracker.record(&name);
                                if shift == ShiftType::Night {
                                    nights[global_day].insert(name.clone());
                                }
                                placed_on[global_day].insert(name.clone());
                                report.placed += 1;

                                let choices = (pool.len() > 1).then(|| pool.to_vec());
                                GridCell::auto(&name, config, choices)
                            }
                            None => {
                                report.unfilled += 1;
                                GridCell::unconstrained(config)
                            }
                        };
                        grid.weeks[week].set(row, day, cell);
                    }
                }
            }

            report.counts = index
                .respondents()
                .iter()
                .map(|name| (name.clone(), tracker.count(name)))
                .collect();
            info!(
                week = week + 1,
                placed = report.placed,
                unfilled = report.unfilled,
                "week assigned"
            );
            weeks.push(report);
        }

        Some(AssignmentOutcome { grid, weeks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const ALL_SHIFTS: &str = "morning,afternoon,night";

    fn run(roster: &[Employee], subs: &[Submission], seed: u64) -> AssignmentOutcome {
        AssignmentEngine::new(CycleConfig::default())
            .assign(roster, subs, &mut SmallRng::seed_from_u64(seed))
            .unwrap()
    }

    fn everyone_everywhere(names: &[&str]) -> Vec<Submission> {
        names
            .iter()
            .map(|n| {
                (0..14).fold(Submission::new(*n), |s, day| s.with_day(day, ALL_SHIFTS))
            })
            .collect()
    }

    fn name_at(outcome: &AssignmentOutcome, global_day: usize, row: usize) -> Option<String> {
        let config = CycleConfig::default();
        outcome
            .grid
            .cell_at(global_day, row, &config)
            .and_then(|c| c.value(&config).name().map(str::to_string))
    }

    #[test]
    fn test_no_submissions_skips() {
        let engine = AssignmentEngine::new(CycleConfig::default());
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(engine.assign(&[], &[], &mut rng).is_none());
        assert!(engine
            .assign(&[], &[Submission::new("  ").with_day(0, "morning")], &mut rng)
            .is_none());
    }

    #[test]
    fn test_scenario_two_of_three_placed() {
        let roster = vec![
            Employee::new("A").with_target("2"),
            Employee::new("B").with_target("1-2"),
            Employee::new("C").with_target("3"),
        ];
        let subs = vec![
            Submission::new("A").with_day(0, "morning"),
            Submission::new("B").with_day(0, "morning"),
            Submission::new("C").with_day(0, "morning"),
        ];

        for seed in 0..32 {
            let outcome = run(&roster, &subs, seed);
            let placed: Vec<String> = (0..2).filter_map(|r| name_at(&outcome, 0, r)).collect();
            assert_eq!(placed.len(), 2);
            assert_ne!(placed[0], placed[1]);

            let left_out: Vec<&str> = ["A", "B", "C"]
                .into_iter()
                .filter(|n| !placed.iter().any(|p| p == n))
                .collect();
            assert_eq!(left_out.len(), 1);
            assert_eq!(outcome.weeks[0].counts[left_out[0]], 0);
            // C (deficit 3) always wins the first slot
            assert_eq!(placed[0], "C");
        }
    }

    #[test]
    fn test_one_shift_per_day() {
        let names = ["A", "B", "C", "D", "E"];
        let roster: Vec<Employee> = names.iter().map(|n| Employee::new(*n).with_target("5")).collect();
        let subs = everyone_everywhere(&names);
        let config = CycleConfig::default();

        for seed in 0..16 {
            let outcome = run(&roster, &subs, seed);
            for day in 0..14 {
                let on_day = outcome.grid.names_on(day, &config);
                let unique: HashSet<&String> = on_day.iter().collect();
                assert_eq!(unique.len(), on_day.len(), "day {day} double-booked");
                assert_eq!(on_day.len(), 5);
            }
        }
    }

    #[test]
    fn test_no_night_then_morning() {
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let roster: Vec<Employee> = names.iter().map(|n| Employee::new(*n).with_target("4-6")).collect();
        let subs = everyone_everywhere(&names);

        for seed in 0..16 {
            let outcome = run(&roster, &subs, seed);
            for day in 1..14 {
                let nights: Vec<String> = (4..6).filter_map(|r| name_at(&outcome, day - 1, r)).collect();
                for row in 0..2 {
                    if let Some(m) = name_at(&outcome, day, row) {
                        assert!(!nights.contains(&m), "day {day}: {m} works night then morning");
                    }
                }
            }
        }
    }

    #[test]
    fn test_cross_week_adjacency() {
        // Only X asks for week-one Saturday night and week-two Sunday morning
        let roster = vec![Employee::new("X").with_target("2")];
        let subs = vec![Submission::new("X").with_day(6, "night").with_day(7, "morning")];

        let outcome = run(&roster, &subs, 3);
        assert_eq!(name_at(&outcome, 6, 4).as_deref(), Some("X"));
        assert_eq!(name_at(&outcome, 7, 0), None);
        assert_eq!(name_at(&outcome, 7, 1), None);
    }

    #[test]
    fn test_pool_containment_and_choices() {
        let roster = vec![Employee::new("A").with_target("3"), Employee::new("B").with_target("3")];
        let subs = vec![
            Submission::new("A").with_day(2, "afternoon").with_day(3, "night"),
            Submission::new("B").with_day(2, "afternoon"),
        ];
        let config = CycleConfig::default();
        let outcome = run(&roster, &subs, 11);

        let afternoon: Vec<String> = (2..4).filter_map(|r| name_at(&outcome, 2, r)).collect();
        assert_eq!(afternoon.len(), 2);
        assert!(afternoon.iter().all(|n| n == "A" || n == "B"));
        let cell = outcome.grid.cell_at(2, 2, &config).unwrap();
        assert_eq!(cell.choices.as_deref(), Some(&["A".to_string(), "B".to_string()][..]));

        // Single-candidate pool: no selection constraint
        let night = outcome.grid.cell_at(3, 4, &config).unwrap();
        assert_eq!(night.clean(&config), "A");
        assert!(night.choices.is_none());
        assert!(night.is_auto(&config));
    }

    #[test]
    fn test_every_cell_written() {
        let roster = vec![Employee::new("A").with_target("1")];
        let subs = vec![Submission::new("A").with_day(0, "morning")];
        let config = CycleConfig::default();
        let outcome = run(&roster, &subs, 0);

        let mut names = 0;
        for week in &outcome.grid.weeks {
            for (_, _, cell) in week.iter() {
                match cell.value(&config) {
                    CellValue::Name { auto, .. } => {
                        assert!(auto);
                        names += 1;
                    }
                    CellValue::Unconstrained => assert!(cell.choices.is_none()),
                    CellValue::Blank => panic!("blank cell after assignment"),
                }
            }
        }
        assert_eq!(names, 1);
        assert_eq!(outcome.weeks[0].placed + outcome.weeks[0].unfilled, 42);
    }

    #[test]
    fn test_weeks_balanced_independently() {
        let roster = vec![Employee::new("A").with_target("1"), Employee::new("B").with_target("1")];
        let subs = everyone_everywhere(&["A", "B"]);
        let outcome = run(&roster, &subs, 5);

        for report in &outcome.weeks {
            assert!(report.counts["A"] > 0);
            assert!(report.counts["B"] > 0);
        }
    }

    #[test]
    fn test_deficit_priority_holds() {
        // Once A reaches its maximum (1), B with a standing deficit is preferred
        let roster = vec![Employee::new("A").with_target("1"), Employee::new("B").with_target("3")];
        let subs = vec![
            Submission::new("A").with_day(0, "morning").with_day(1, "morning"),
            Submission::new("B").with_day(1, "morning"),
        ];
        for seed in 0..16 {
            let outcome = run(&roster, &subs, seed);
            assert_eq!(name_at(&outcome, 0, 0).as_deref(), Some("A"));
            assert_eq!(name_at(&outcome, 1, 0).as_deref(), Some("B"));
            assert_eq!(name_at(&outcome, 1, 1).as_deref(), Some("A"));
        }
    }
}
