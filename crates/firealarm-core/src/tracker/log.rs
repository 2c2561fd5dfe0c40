use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One recorded confirmation that a floor was inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckEvent {
    pub floor: i32,
    /// Position in the current activity window, starting at 0.
    pub seq: u64,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only sequence of check events. Duplicates are kept; the only way
/// to remove anything is [`CheckLog::clear`].
#[derive(Debug, Clone, Default)]
pub struct CheckLog {
    events: Vec<CheckEvent>,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, floor: i32) {
        let seq = self.events.len() as u64;
        self.events.push(CheckEvent {
            floor,
            seq,
            recorded_at: Utc::now(),
        });
    }

    /// Drop every event. Returns how many there were.
    pub fn clear(&mut self) -> usize {
        let cleared = self.events.len();
        self.events.clear();
        cleared
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[CheckEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&CheckEvent> {
        self.events.last()
    }

    /// Distinct recorded floors, ascending.
    pub fn distinct_floors(&self) -> BTreeSet<i32> {
        self.events.iter().map(|e| e.floor).collect()
    }

    /// The floor checked most often. Among equally frequent floors the one
    /// that was checked first wins.
    pub fn most_checked(&self) -> Option<i32> {
        let mut order: Vec<(i32, usize)> = Vec::new();
        let mut slot: HashMap<i32, usize> = HashMap::new();
        for event in &self.events {
            match slot.get(&event.floor) {
                Some(&i) => order[i].1 += 1,
                None => {
                    slot.insert(event.floor, order.len());
                    order.push((event.floor, 1));
                }
            }
        }

        let mut best: Option<(i32, usize)> = None;
        for (floor, count) in order {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((floor, count));
            }
        }
        best.map(|(floor, _)| floor)
    }
}
