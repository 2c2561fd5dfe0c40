use std::sync::Arc;

use firealarm_core::{format, FloorTracker};

use super::{CommandContext, CommandHandler};

/// `/summary`: checked and unchecked floors.
pub struct SummaryHandler {
    tracker: Arc<FloorTracker>,
}

impl SummaryHandler {
    pub fn new(tracker: Arc<FloorTracker>) -> Self {
        Self { tracker }
    }
}

impl CommandHandler for SummaryHandler {
    fn command(&self) -> &'static str {
        "/summary"
    }

    fn handle(&self, _args: &str, _ctx: &CommandContext) -> String {
        // Both lists from one snapshot so a concurrent clear cannot split them.
        let stats = self.tracker.statistics();
        format::summary(&stats.checked_floors, &stats.unchecked_floors)
    }
}
