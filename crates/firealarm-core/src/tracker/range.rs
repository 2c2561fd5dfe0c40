use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::ConfigError;

/// Inclusive bounds of the floors that take part in a drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRange {
    min: i32,
    max: i32,
}

impl FloorRange {
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidValue {
                key: "tracker.min_floor".into(),
                message: format!("min_floor ({min}) must not exceed max_floor ({max})"),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Whether a check of `floor` may be recorded.
    pub fn accepts(&self, floor: i32) -> bool {
        (self.min..=self.max).contains(&floor)
    }

    /// Number of floors in the range. Never zero, and exact for any pair of
    /// `i32` bounds on every target.
    pub fn floor_count(&self) -> u64 {
        (i64::from(self.max) - i64::from(self.min)).unsigned_abs() + 1
    }

    pub fn floors(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// The part of `start..=end` that lies inside the range. Empty when the
    /// two do not overlap or when `start > end`.
    pub fn clamp(&self, start: i32, end: i32) -> RangeInclusive<i32> {
        start.max(self.min)..=end.min(self.max)
    }
}

impl Default for FloorRange {
    fn default() -> Self {
        Self { min: 2, max: 25 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_excludes_ground_floor() {
        let range = FloorRange::default();
        assert!(!range.accepts(1));
        assert!(range.accepts(2));
        assert!(range.accepts(25));
        assert!(!range.accepts(26));
        assert_eq!(range.floor_count(), 24);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(FloorRange::new(5, 4).is_err());
        assert_eq!(FloorRange::new(4, 4).unwrap().floor_count(), 1);
    }

    #[test]
    fn clamp_limits_to_range() {
        let range = FloorRange::default();
        assert_eq!(range.clamp(0, 1_000_000), 2..=25);
        assert_eq!(range.clamp(7, 10), 7..=10);
        assert!(range.clamp(10, 7).is_empty());
        assert!(range.clamp(30, 40).is_empty());
    }

    #[test]
    fn extreme_bounds_do_not_overflow_floor_count() {
        let range = FloorRange::new(i32::MIN, i32::MAX).unwrap();
        assert_eq!(range.floor_count(), 1u64 << 32);
    }
}
