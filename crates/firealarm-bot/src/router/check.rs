use std::sync::Arc;

use firealarm_core::FloorTracker;

use super::{CommandContext, CommandHandler};

const USAGE: &str = "Example: /check 12";

/// `/check <floors>`: record checked floors.
pub struct CheckHandler {
    tracker: Arc<FloorTracker>,
}

impl CheckHandler {
    pub fn new(tracker: Arc<FloorTracker>) -> Self {
        Self { tracker }
    }
}

impl CommandHandler for CheckHandler {
    fn command(&self) -> &'static str {
        "/check"
    }

    fn handle(&self, args: &str, ctx: &CommandContext) -> String {
        if args.trim().is_empty() {
            return format!("Invalid floor range. {USAGE}");
        }
        match self.tracker.add_checked_floor(args, ctx.user_id) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(user_id = ctx.user_id, input = args, error = %e, "rejected check command");
                format!("{e}. {USAGE}")
            }
        }
    }
}
