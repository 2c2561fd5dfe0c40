//! Command dispatch.
//!
//! Inbound chat text is matched on its first word against a table of
//! handlers. The router knows nothing about transports; it takes text and
//! returns the reply text, if any.

mod check;
mod help;
mod stats;
mod summary;

pub use check::CheckHandler;
pub use help::HelpHandler;
pub use stats::StatsHandler;
pub use summary::SummaryHandler;

use std::collections::HashMap;
use std::sync::Arc;

use firealarm_core::FloorTracker;

/// Who sent a message and where to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
    pub user_id: i64,
    pub chat_id: i64,
}

/// One chat command.
pub trait CommandHandler: Send + Sync {
    /// Command token including the leading slash, lower case.
    fn command(&self) -> &'static str;

    /// Other tokens that reach the same handler.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Produce the reply for `args`, the text after the command token.
    fn handle(&self, args: &str, ctx: &CommandContext) -> String;
}

/// Lookup table from command token to handler.
pub struct CommandRouter {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandRouter {
    pub fn new(handlers: Vec<Arc<dyn CommandHandler>>) -> Self {
        let mut table = HashMap::new();
        for handler in handlers {
            table.insert(handler.command(), Arc::clone(&handler));
            for alias in handler.aliases() {
                table.insert(*alias, Arc::clone(&handler));
            }
        }
        Self { handlers: table }
    }

    /// The standard command set over one shared tracker.
    pub fn with_tracker(tracker: Arc<FloorTracker>) -> Self {
        let handlers: Vec<Arc<dyn CommandHandler>> = vec![
            Arc::new(CheckHandler::new(Arc::clone(&tracker))),
            Arc::new(SummaryHandler::new(Arc::clone(&tracker))),
            Arc::new(StatsHandler::new(tracker)),
            Arc::new(HelpHandler),
        ];
        Self::new(handlers)
    }

    /// Reply to `text`, or `None` if it is not a known command.
    pub fn route(&self, text: &str, ctx: &CommandContext) -> Option<String> {
        let (command, args) = split_command(text)?;
        let handler = self.handlers.get(command.as_str())?;
        tracing::debug!(
            command = %command,
            user_id = ctx.user_id,
            chat_id = ctx.chat_id,
            "dispatching command"
        );
        Some(handler.handle(args, ctx))
    }

    /// Every registered token, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        let mut commands: Vec<_> = self.handlers.keys().copied().collect();
        commands.sort_unstable();
        commands
    }
}

/// Split `"/Check@drill_bot 7-10"` into `("/check", "7-10")`.
fn split_command(text: &str) -> Option<(String, &str)> {
    let text = text.trim_start();
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    let (token, rest) = text.split_at(end);
    if token.is_empty() {
        return None;
    }
    let token = token.split('@').next().unwrap_or(token);
    Some((token.to_lowercase(), rest.trim()))
}
