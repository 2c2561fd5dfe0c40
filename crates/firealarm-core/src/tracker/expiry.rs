//! Debounced idle expiry.
//!
//! Every accepted check re-arms a single tokio task that sleeps for the idle
//! interval and then wipes the log. Re-arming aborts the previous task and
//! bumps a generation counter kept under the tracker lock, so a task that
//! already woke up but lost the race for the lock sees a newer generation
//! and leaves the log alone.

use std::sync::{Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::log::CheckLog;

/// Everything guarded by the tracker lock.
#[derive(Debug, Default)]
pub(crate) struct TrackerState {
    pub(crate) log: CheckLog,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl TrackerState {
    pub(crate) fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel any pending expiry. Returns whether one was pending.
    pub(crate) fn disarm(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.pending.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    /// Clear the log if `generation` is still the latest arming.
    fn expire(&mut self, generation: u64) -> Option<usize> {
        if self.generation != generation {
            tracing::debug!(generation, current = self.generation, "stale idle expiry ignored");
            return None;
        }
        self.pending = None;
        Some(self.log.clear())
    }
}

/// Lock the tracker state. A panic while holding the lock cannot leave the
/// log half-written, so poisoning is ignored.
pub(crate) fn lock(state: &Mutex<TrackerState>) -> MutexGuard<'_, TrackerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Schedules the idle clear on a tokio runtime.
#[derive(Debug, Clone)]
pub(crate) struct IdleExpiry {
    interval: Duration,
    runtime: Handle,
}

impl IdleExpiry {
    pub(crate) fn new(interval: Duration, runtime: Handle) -> Self {
        Self { interval, runtime }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the pending expiry, if any, and start a fresh one.
    pub(crate) fn rearm(&self, state: &mut TrackerState, shared: Weak<Mutex<TrackerState>>) {
        state.disarm();
        let generation = state.generation;
        let interval = self.interval;

        state.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(interval).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut state = lock(&shared);
            if let Some(cleared) = state.expire(generation) {
                tracing::info!(
                    cleared,
                    idle_secs = interval.as_secs(),
                    "no checks within idle interval, floor log cleared"
                );
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_ignores_superseded_generation() {
        let mut state = TrackerState::default();
        state.log.push(4);
        let stale = state.generation;
        state.disarm();

        assert_eq!(state.expire(stale), None);
        assert_eq!(state.log.len(), 1);

        let current = state.generation;
        assert_eq!(state.expire(current), Some(1));
        assert!(state.log.is_empty());
    }

    #[test]
    fn disarm_without_pending_task() {
        let mut state = TrackerState::default();
        assert!(!state.disarm());
        assert!(!state.is_armed());
    }
}
