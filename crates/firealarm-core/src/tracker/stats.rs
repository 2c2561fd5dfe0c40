use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::log::CheckLog;
use super::range::FloorRange;

/// Point-in-time view of drill progress, computed from one state of the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorStatistics {
    /// Distinct checked floors, ascending.
    pub checked_floors: Vec<i32>,
    /// Floors of the valid range nobody has checked yet, ascending.
    pub unchecked_floors: Vec<i32>,
    /// Every recorded check, duplicates included.
    pub total_checks: usize,
    pub unique_floors: usize,
    pub most_checked_floor: Option<i32>,
    pub last_checked_floor: Option<i32>,
    /// `100 * unique_floors / range size`, always within 0..=100.
    pub checked_percentage: f64,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl FloorStatistics {
    pub(crate) fn compute(log: &CheckLog, range: &FloorRange) -> Self {
        let distinct = log.distinct_floors();
        let unchecked_floors = unchecked_in(&distinct, range);
        let checked_floors: Vec<i32> = distinct.into_iter().collect();
        let unique_floors = checked_floors.len();
        let last = log.last();

        Self {
            total_checks: log.len(),
            unique_floors,
            most_checked_floor: log.most_checked(),
            last_checked_floor: last.map(|e| e.floor),
            checked_percentage: percentage(unique_floors, range),
            last_checked_at: last.map(|e| e.recorded_at),
            checked_floors,
            unchecked_floors,
        }
    }
}

pub(crate) fn checked_floors(log: &CheckLog) -> Vec<i32> {
    log.distinct_floors().into_iter().collect()
}

pub(crate) fn unchecked_floors(log: &CheckLog, range: &FloorRange) -> Vec<i32> {
    unchecked_in(&log.distinct_floors(), range)
}

fn unchecked_in(checked: &BTreeSet<i32>, range: &FloorRange) -> Vec<i32> {
    range.floors().filter(|f| !checked.contains(f)).collect()
}

fn percentage(unique: usize, range: &FloorRange) -> f64 {
    (unique as f64 / range.floor_count() as f64 * 100.0).clamp(0.0, 100.0)
}
