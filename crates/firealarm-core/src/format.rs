//! Plain-text rendering of tracker results for chat replies.

use crate::tracker::FloorStatistics;

/// Shown in place of an empty floor list.
pub const NO_FLOORS: &str = "no floors recorded yet";

/// Shown in place of a statistic that has no value yet.
pub const NONE: &str = "none";

/// `"2, 5, 7"`, or [`NO_FLOORS`] when empty.
pub fn floor_list(floors: &[i32]) -> String {
    if floors.is_empty() {
        return NO_FLOORS.to_string();
    }
    floors
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn floor_added(floor: i32) -> String {
    format!("Floor {floor} added")
}

pub fn floors_added(floors: &[i32]) -> String {
    format!("Floors {} added", floor_list(floors))
}

pub fn range_added(start: i32, end: i32) -> String {
    format!("Floors {start} to {end} added.")
}

/// Two-line progress summary.
pub fn summary(checked: &[i32], unchecked: &[i32]) -> String {
    format!(
        "Checked floors: {}\nUnchecked floors: {}",
        floor_list(checked),
        floor_list(unchecked)
    )
}

/// Full statistics report, one figure per line.
pub fn statistics(stats: &FloorStatistics) -> String {
    let optional = |v: Option<i32>| v.map_or_else(|| NONE.to_string(), |f| f.to_string());
    [
        format!("Checked floors: {}", floor_list(&stats.checked_floors)),
        format!("Unchecked floors: {}", floor_list(&stats.unchecked_floors)),
        format!("Total checks: {}", stats.total_checks),
        format!("Unique floors: {}", stats.unique_floors),
        format!("Most checked floor: {}", optional(stats.most_checked_floor)),
        format!("Last checked floor: {}", optional(stats.last_checked_floor)),
        format!("Checked percentage: {:.2}%", stats.checked_percentage),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_list_joins_with_comma_and_space() {
        assert_eq!(floor_list(&[2, 5, 7]), "2, 5, 7");
        assert_eq!(floor_list(&[]), NO_FLOORS);
    }

    #[test]
    fn confirmations() {
        assert_eq!(floor_added(5), "Floor 5 added");
        assert_eq!(floors_added(&[1, 2, 3]), "Floors 1, 2, 3 added");
        assert_eq!(range_added(1, 3), "Floors 1 to 3 added.");
    }

    #[test]
    fn summary_lists_both_sides() {
        assert_eq!(
            summary(&[1, 2, 3], &[4, 5]),
            "Checked floors: 1, 2, 3\nUnchecked floors: 4, 5"
        );
        assert_eq!(
            summary(&[], &[4]),
            "Checked floors: no floors recorded yet\nUnchecked floors: 4"
        );
    }

    #[test]
    fn statistics_report() {
        let stats = FloorStatistics {
            checked_floors: vec![1, 2, 3],
            unchecked_floors: vec![4, 5],
            total_checks: 10,
            unique_floors: 3,
            most_checked_floor: Some(2),
            last_checked_floor: Some(3),
            checked_percentage: 75.0,
            last_checked_at: None,
        };
        assert_eq!(
            statistics(&stats),
            "Checked floors: 1, 2, 3\n\
             Unchecked floors: 4, 5\n\
             Total checks: 10\n\
             Unique floors: 3\n\
             Most checked floor: 2\n\
             Last checked floor: 3\n\
             Checked percentage: 75.00%"
        );
    }

    #[test]
    fn statistics_report_for_empty_drill() {
        let stats = FloorStatistics {
            checked_floors: vec![],
            unchecked_floors: vec![2, 3],
            total_checks: 0,
            unique_floors: 0,
            most_checked_floor: None,
            last_checked_floor: None,
            checked_percentage: 0.0,
            last_checked_at: None,
        };
        let report = statistics(&stats);
        assert!(report.contains("Most checked floor: none"));
        assert!(report.contains("Checked percentage: 0.00%"));
    }
}
