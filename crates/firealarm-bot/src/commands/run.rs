//! `run`: serve the Telegram bot until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use firealarm_core::config::TOKEN_ENV_VAR;
use firealarm_core::{Config, ConfigError, FloorTracker};

use crate::error::BotError;
use crate::router::CommandRouter;
use crate::telegram::{Poller, TelegramClient};

pub async fn run(config: &Config) -> Result<(), BotError> {
    let token = config.telegram.resolved_token().ok_or_else(|| {
        ConfigError::MissingKey(format!("telegram.token (or set {TOKEN_ENV_VAR})"))
    })?;

    let tracker = Arc::new(FloorTracker::new(&config.tracker)?);
    let router = Arc::new(CommandRouter::with_tracker(Arc::clone(&tracker)));
    let poll_timeout = Duration::from_secs(config.telegram.poll_timeout_secs);
    let client = TelegramClient::new(&config.telegram.api_base, &token, poll_timeout)?;

    let range = tracker.range();
    tracing::info!(
        min_floor = range.min(),
        max_floor = range.max(),
        idle_clear_secs = tracker.idle_clear_interval().as_secs(),
        commands = ?router.commands(),
        "starting Telegram poller"
    );
    Poller::new(client, router, poll_timeout)
        .run(shutdown_signal())
        .await;

    let cleared = tracker.reset();
    tracing::info!(cleared, "shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
