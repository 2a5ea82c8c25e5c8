//! Shift tallies and workload statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weekly actual | Cells in the week holding the employee's name |
//! | Weekly status | `OK` iff the actual count satisfies the target |
//! | Total | Shifts across the whole cycle |
//! | Nights | Night-row shifts across the cycle |
//! | Weekend | Any shift on the weekend day, plus the night before it |

use std::collections::HashMap;

use crate::config::CycleConfig;
use crate::models::{Employee, ScheduleGrid, ShiftType, StaffStatus, WeekGrid, WeekTally};

/// Counts clean names in one week (sentinel and blanks excluded).
pub fn count_week(week: &WeekGrid, config: &CycleConfig) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for (_, _, cell) in week.iter() {
        if let Some(name) = cell.value(config).name() {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Recomputes every employee's weekly tallies from the grid.
///
/// Returns the number of `(employee, week)` pairs whose status is `Check`.
pub fn sync_tallies(grid: &ScheduleGrid, roster: &mut [Employee], config: &CycleConfig) -> usize {
    let per_week: Vec<HashMap<String, u32>> =
        grid.weeks.iter().map(|w| count_week(w, config)).collect();

    let mut checks = 0;
    for employee in roster.iter_mut() {
        employee.weeks.clear();
        for (week, counts) in per_week.iter().enumerate() {
            let actual = counts.get(&employee.name).copied().unwrap_or(0);
            let tally = WeekTally::new(actual, &employee.target);
            if tally.status == StaffStatus::Check {
                checks += 1;
            }
            employee.set_tally(week, tally);
        }
    }
    checks
}

/// Cycle-wide workload numbers for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadStats {
    pub name: String,
    pub total: u32,
    pub nights: u32,
    pub weekend: u32,
}

impl WorkloadStats {
    /// Computes stats for every roster employee, in roster order.
    ///
    /// Names in the grid that are not on the roster are ignored.
    pub fn calculate(grid: &ScheduleGrid, roster: &[Employee], config: &CycleConfig) -> Vec<Self> {
        let mut stats: Vec<Self> = roster
            .iter()
            .map(|e| Self {
                name: e.name.clone(),
                ..Self::default()
            })
            .collect();
        let slot: HashMap<&str, usize> = roster
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.as_str(), i))
            .collect();

        let eve = config.weekend_day.checked_sub(1);
        for week in &grid.weeks {
            for (row, day, cell) in week.iter() {
                let value = cell.value(config);
                let Some(&i) = value.name().and_then(|n| slot.get(n)) else {
                    continue;
                };
                let is_night = config.shift_of_row(row) == Some(ShiftType::Night);

                stats[i].total += 1;
                if is_night {
                    stats[i].nights += 1;
                }
                if day == config.weekend_day || (Some(day) == eve && is_night) {
                    stats[i].weekend += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GridCell;

    fn put(grid: &mut ScheduleGrid, global_day: usize, row: usize, name: &str, config: &CycleConfig) {
        *grid.cell_at_mut(global_day, row, config).unwrap() = GridCell::auto(name, config, None);
    }

    #[test]
    fn test_count_week_skips_sentinel() {
        let config = CycleConfig::default();
        let mut grid = ScheduleGrid::new(&config);
        grid.reset(&config);
        put(&mut grid, 0, 0, "A", &config);
        put(&mut grid, 1, 4, "A", &config);
        put(&mut grid, 8, 2, "B", &config);

        let w1 = count_week(&grid.weeks[0], &config);
        assert_eq!(w1.len(), 1);
        assert_eq!(w1["A"], 2);
        assert_eq!(count_week(&grid.weeks[1], &config)["B"], 1);
    }

    #[test]
    fn test_sync_tallies_range_target() {
        let config = CycleConfig::default();
        let mut grid = ScheduleGrid::new(&config);
        for day in 0..4 {
            put(&mut grid, day, 0, "A", &config);
        }
        for day in 7..9 {
            put(&mut grid, day, 0, "A", &config);
        }
        let mut roster = vec![Employee::new("A").with_target("3-5"), Employee::new("Z").with_target("0")];

        let checks = sync_tallies(&grid, &mut roster, &config);
        assert_eq!(roster[0].weeks[0], WeekTally { actual: 4, status: StaffStatus::Ok });
        assert_eq!(roster[0].weeks[1], WeekTally { actual: 2, status: StaffStatus::Check });
        assert_eq!(roster[1].status_for_week(0), Some(StaffStatus::Ok));
        assert_eq!(checks, 1);
    }

    #[test]
    fn test_sync_tallies_over_max() {
        let config = CycleConfig::default();
        let mut grid = ScheduleGrid::new(&config);
        for day in 0..6 {
            put(&mut grid, day, 2, "A", &config);
        }
        let mut roster = vec![Employee::new("A").with_target("3-5")];
        sync_tallies(&grid, &mut roster, &config);
        assert_eq!(roster[0].weeks[0].actual, 6);
        assert_eq!(roster[0].status_for_week(0), Some(StaffStatus::Check));
    }

    #[test]
    fn test_workload_stats() {
        let config = CycleConfig::default();
        let mut grid = ScheduleGrid::new(&config);
        put(&mut grid, 0, 0, "A", &config); // Sunday morning
        put(&mut grid, 5, 4, "A", &config); // Friday night → weekend + night
        put(&mut grid, 5, 0, "B", &config); // Friday morning
        put(&mut grid, 13, 1, "B", &config); // Saturday morning → weekend
        put(&mut grid, 2, 3, "Ghost", &config);
        let roster = vec![Employee::new("A"), Employee::new("B")];

        let stats = WorkloadStats::calculate(&grid, &roster, &config);
        assert_eq!(
            stats[0],
            WorkloadStats { name: "A".into(), total: 2, nights: 1, weekend: 1 }
        );
        assert_eq!(
            stats[1],
            WorkloadStats { name: "B".into(), total: 2, nights: 0, weekend: 1 }
        );
    }
}
