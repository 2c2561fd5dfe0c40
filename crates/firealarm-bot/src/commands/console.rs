//! `console`: answer commands typed on stdin.

use std::sync::Arc;

use firealarm_core::{Config, FloorTracker};
use tokio::io::BufReader;

use crate::console::run_console;
use crate::error::BotError;
use crate::router::CommandRouter;

pub async fn run(config: &Config, user_id: i64) -> Result<(), BotError> {
    let tracker = Arc::new(FloorTracker::new(&config.tracker)?);
    let router = CommandRouter::with_tracker(tracker);

    let stdin = BufReader::new(tokio::io::stdin());
    let replies = run_console(&router, stdin, tokio::io::stdout(), user_id).await?;
    tracing::debug!(replies, "console input closed");
    Ok(())
}
