//! Floor check tracker.
//!
//! Keeps the log of floor checks for the current drill, answers progress
//! queries, and wipes itself after a period without new checks.
//!
//! ## State Transitions
//!
//! ```text
//! Idle(empty) --accepted check--> Active(armed)
//! Active      --accepted check--> Active(re-armed)
//! Active      --idle interval---> Idle(empty)
//! ```
//!
//! Checks of floors outside the configured range are ignored without error
//! and do not touch the timer.
//!
//! ## Usage
//!
//! ```ignore
//! let tracker = FloorTracker::new(&TrackerConfig::default())?;
//! tracker.add_checked_floor("7-10", user_id)?;
//! let stats = tracker.statistics();
//! ```

mod expiry;
mod log;
mod range;
mod stats;

pub use log::{CheckEvent, CheckLog};
pub use range::FloorRange;
pub use stats::FloorStatistics;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;

use crate::config::TrackerConfig;
use crate::error::{CoreError, Result, ValidationError};
use crate::format;
use crate::input::FloorInput;
use expiry::{lock, IdleExpiry, TrackerState};

/// The floor check store. Share it as `Arc<FloorTracker>`; every method takes
/// `&self` and serialises on one internal lock.
#[derive(Debug)]
pub struct FloorTracker {
    range: FloorRange,
    expiry: IdleExpiry,
    state: Arc<Mutex<TrackerState>>,
}

impl FloorTracker {
    /// Build a tracker that runs its idle timer on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or if called outside
    /// a tokio runtime.
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
        Self::with_runtime(config, runtime)
    }

    /// Build a tracker whose idle timer runs on `runtime`.
    pub fn with_runtime(config: &TrackerConfig, runtime: Handle) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            range: config.range()?,
            expiry: IdleExpiry::new(config.idle_clear_interval(), runtime),
            state: Arc::new(Mutex::new(TrackerState::default())),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn range(&self) -> FloorRange {
        self.range
    }

    pub fn idle_clear_interval(&self) -> Duration {
        self.expiry.interval()
    }

    /// Whether an idle clear is scheduled.
    pub fn is_armed(&self) -> bool {
        lock(&self.state).is_armed()
    }

    /// Distinct checked floors, ascending.
    pub fn unique_floors(&self) -> Vec<i32> {
        stats::checked_floors(&lock(&self.state).log)
    }

    /// Floors in the valid range that nobody has checked yet, ascending.
    pub fn unchecked_floors(&self) -> Vec<i32> {
        stats::unchecked_floors(&lock(&self.state).log, &self.range)
    }

    /// All progress figures, taken from a single state of the log.
    pub fn statistics(&self) -> FloorStatistics {
        FloorStatistics::compute(&lock(&self.state).log, &self.range)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record one check of `floor`. Returns `false`, and changes nothing, if
    /// the floor is outside the valid range.
    pub fn add_floor(&self, floor: i32) -> bool {
        self.record(std::iter::once(floor)) == 1
    }

    /// Parse a user's floor argument, record what it names, and return the
    /// confirmation text.
    ///
    /// A descending range such as `10-7` records nothing but is still
    /// confirmed with the bounds as given.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the input is empty or malformed; the
    /// log is left untouched in that case.
    pub fn add_checked_floor(&self, input: &str, user_id: i64) -> Result<String, ValidationError> {
        match FloorInput::parse(input)? {
            FloorInput::Range { start, end } => {
                if start > end {
                    tracing::warn!(user_id, start, end, "descending floor range records nothing");
                }
                let recorded = self.record(self.range.clamp(start, end));
                tracing::info!(user_id, start, end, recorded, "user added floor range");
                Ok(format::range_added(start, end))
            }
            FloorInput::List(floors) => {
                let recorded = self.record(floors.iter().copied());
                tracing::info!(user_id, ?floors, recorded, "user added floors");
                Ok(format::floors_added(&floors))
            }
            FloorInput::Single(floor) => {
                let recorded = self.record(std::iter::once(floor));
                tracing::info!(user_id, floor, recorded, "user added floor");
                Ok(format::floor_added(floor))
            }
        }
    }

    /// Forget every check and cancel the idle timer. Returns how many checks
    /// were dropped.
    pub fn reset(&self) -> usize {
        let mut state = lock(&self.state);
        state.disarm();
        state.log.clear()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Append every accepted floor under one lock and re-arm the timer once
    /// if anything was appended.
    fn record(&self, floors: impl IntoIterator<Item = i32>) -> usize {
        let mut state = lock(&self.state);
        let mut recorded = 0;
        for floor in floors {
            if self.range.accepts(floor) {
                state.log.push(floor);
                tracing::debug!(floor, "floor recorded");
                recorded += 1;
            } else {
                tracing::debug!(floor, min = self.range.min(), max = self.range.max(), "floor out of range ignored");
            }
        }
        if recorded > 0 {
            self.expiry.rearm(&mut state, Arc::downgrade(&self.state));
        }
        recorded
    }
}

impl Drop for FloorTracker {
    fn drop(&mut self) {
        lock(&self.state).disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> FloorTracker {
        FloorTracker::new(&TrackerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn repeated_checks_count_once_in_unique_floors() {
        let tracker = tracker();
        assert!(tracker.add_floor(5));
        assert!(tracker.add_floor(5));
        assert!(tracker.add_floor(7));

        let stats = tracker.statistics();
        assert_eq!(tracker.unique_floors(), vec![5, 7]);
        assert_eq!(stats.total_checks, 3);
        assert_eq!(stats.most_checked_floor, Some(5));
        assert_eq!(stats.last_checked_floor, Some(7));
        assert_eq!(format!("{:.2}", stats.checked_percentage), "8.33");
    }

    #[tokio::test]
    async fn out_of_range_floors_are_ignored() {
        let tracker = tracker();
        assert!(!tracker.add_floor(1));
        assert!(!tracker.add_floor(26));
        assert!(!tracker.add_floor(-3));
        assert_eq!(tracker.statistics().total_checks, 0);
        assert!(!tracker.is_armed());
    }

    #[tokio::test]
    async fn exposes_configured_range_and_interval() {
        let config = TrackerConfig {
            min_floor: 3,
            max_floor: 9,
            idle_clear_secs: 120,
        };
        let tracker = FloorTracker::new(&config).unwrap();
        assert_eq!(tracker.range(), FloorRange::new(3, 9).unwrap());
        assert_eq!(tracker.idle_clear_interval(), Duration::from_secs(120));
    }

    #[tokio::test]
    async fn range_input_adds_every_floor() {
        let tracker = tracker();
        let reply = tracker.add_checked_floor("7-10", 42).unwrap();
        assert_eq!(reply, format::range_added(7, 10));
        assert_eq!(tracker.unique_floors(), vec![7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn descending_range_records_nothing_but_still_confirms() {
        let tracker = tracker();
        let reply = tracker.add_checked_floor("10-7", 42).unwrap();
        assert_eq!(reply, format::range_added(10, 7));
        assert!(tracker.unique_floors().is_empty());
        assert_eq!(tracker.statistics().total_checks, 0);
    }

    #[tokio::test]
    async fn huge_range_is_clamped_to_valid_floors() {
        let tracker = tracker();
        tracker.add_checked_floor("0-2000000000", 1).unwrap();
        assert_eq!(tracker.statistics().total_checks, 24);
        assert!(tracker.unchecked_floors().is_empty());
    }

    #[tokio::test]
    async fn list_input_records_only_valid_floors() {
        let tracker = tracker();
        let reply = tracker.add_checked_floor("1, 2, 40", 42).unwrap();
        assert_eq!(reply, format::floors_added(&[1, 2, 40]));
        assert_eq!(tracker.unique_floors(), vec![2]);
        assert_eq!(tracker.statistics().total_checks, 1);
    }

    #[tokio::test]
    async fn invalid_input_leaves_state_unchanged() {
        let tracker = tracker();
        tracker.add_floor(3);
        assert_eq!(
            tracker.add_checked_floor("1-a", 1),
            Err(ValidationError::InvalidRange)
        );
        assert_eq!(
            tracker.add_checked_floor("  ", 1),
            Err(ValidationError::EmptyInput)
        );
        assert_eq!(
            tracker.add_checked_floor("roof", 1),
            Err(ValidationError::InvalidFloor)
        );
        assert_eq!(tracker.statistics().total_checks, 1);
    }

    #[tokio::test]
    async fn configured_minimum_is_the_lower_bound() {
        let config = TrackerConfig {
            min_floor: 1,
            max_floor: 3,
            ..TrackerConfig::default()
        };
        let tracker = FloorTracker::new(&config).unwrap();
        assert!(tracker.add_floor(1));

        let config = TrackerConfig {
            min_floor: 4,
            ..TrackerConfig::default()
        };
        let tracker = FloorTracker::new(&config).unwrap();
        assert!(!tracker.add_floor(3));
        assert_eq!(tracker.unchecked_floors().first(), Some(&4));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_interval_clears_the_log() {
        let tracker = tracker();
        tracker.add_floor(9);
        assert!(tracker.is_armed());

        tokio::time::sleep(Duration::from_secs(3601)).await;

        let stats = tracker.statistics();
        assert_eq!(stats.total_checks, 0);
        assert_eq!(stats.unique_floors, 0);
        assert!(!tracker.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn each_check_postpones_the_clear() {
        let tracker = tracker();
        tracker.add_floor(9);
        tokio::time::sleep(Duration::from_secs(1800)).await;
        tracker.add_floor(10);
        tokio::time::sleep(Duration::from_secs(3599)).await;

        assert_eq!(tracker.statistics().total_checks, 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(tracker.statistics().total_checks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_check_does_not_postpone_the_clear() {
        let tracker = tracker();
        tracker.add_floor(9);
        tokio::time::sleep(Duration::from_secs(1800)).await;
        tracker.add_floor(99);
        tokio::time::sleep(Duration::from_secs(1801)).await;
        assert_eq!(tracker.statistics().total_checks, 0);
    }

    #[tokio::test]
    async fn reset_clears_and_disarms() {
        let tracker = tracker();
        tracker.add_checked_floor("2,3,4", 7).unwrap();
        assert_eq!(tracker.reset(), 3);
        assert!(!tracker.is_armed());
        assert_eq!(tracker.unchecked_floors().len(), 24);
    }

    #[test]
    fn new_outside_runtime_fails() {
        assert!(matches!(
            FloorTracker::new(&TrackerConfig::default()),
            Err(CoreError::NoRuntime)
        ));
    }
}
