use std::sync::Arc;

use firealarm_core::{format, FloorTracker};

use super::{CommandContext, CommandHandler};

/// `/stats`: the full progress report.
pub struct StatsHandler {
    tracker: Arc<FloorTracker>,
}

impl StatsHandler {
    pub fn new(tracker: Arc<FloorTracker>) -> Self {
        Self { tracker }
    }
}

impl CommandHandler for StatsHandler {
    fn command(&self) -> &'static str {
        "/stats"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["/joke"]
    }

    fn handle(&self, _args: &str, _ctx: &CommandContext) -> String {
        format::statistics(&self.tracker.statistics())
    }
}
