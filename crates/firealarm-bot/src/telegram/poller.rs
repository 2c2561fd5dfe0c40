//! Long-poll loop: fetch updates, route them, send the replies back.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::client::TelegramClient;
use super::types::Update;
use crate::error::TelegramError;
use crate::router::{CommandContext, CommandRouter};

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Doubling delay between failed polls.
#[derive(Debug)]
struct Backoff {
    next: Duration,
}

impl Backoff {
    fn new() -> Self {
        Self {
            next: INITIAL_BACKOFF,
        }
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (self.next * 2).min(MAX_BACKOFF);
        delay
    }

    fn reset(&mut self) {
        self.next = INITIAL_BACKOFF;
    }
}

pub struct Poller {
    client: TelegramClient,
    router: Arc<CommandRouter>,
    poll_timeout: Duration,
    offset: Option<i64>,
}

impl Poller {
    pub fn new(client: TelegramClient, router: Arc<CommandRouter>, poll_timeout: Duration) -> Self {
        Self {
            client,
            router,
            poll_timeout,
            offset: None,
        }
    }

    /// Poll until `shutdown` resolves. Poll failures are retried with backoff.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        let mut backoff = Backoff::new();

        loop {
            let polled = tokio::select! {
                _ = &mut shutdown => break,
                polled = self.poll_once() => polled,
            };

            match polled {
                Ok(_) => backoff.reset(),
                Err(e) => {
                    let delay = backoff.next_delay();
                    tracing::warn!(error = %e, retry_in_secs = delay.as_secs(), "polling Telegram failed");
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
        tracing::info!("poller stopped");
    }

    /// Fetch one batch of updates and answer each. Returns how many updates
    /// were received.
    pub async fn poll_once(&mut self) -> Result<usize, TelegramError> {
        let updates = self.client.get_updates(self.offset, self.poll_timeout).await?;
        let received = updates.len();
        for update in updates {
            self.offset = Some(update.update_id + 1);
            if let Some((chat_id, reply)) = self.reply_to(&update) {
                if let Err(e) = self.client.send_message(chat_id, &reply).await {
                    tracing::warn!(chat_id, error = %e, "failed to send reply");
                }
            }
        }
        Ok(received)
    }

    /// The chat and text to answer `update` with, if it is a known command.
    fn reply_to(&self, update: &Update) -> Option<(i64, String)> {
        let message = update.message.as_ref()?;
        let text = message.text.as_deref()?;
        let ctx = CommandContext {
            user_id: message.from.as_ref().map_or(0, |u| u.id),
            chat_id: message.chat.id,
        };
        let reply = self.router.route(text, &ctx)?;
        Some((ctx.chat_id, reply))
    }
}
