//! Error types for the bot front end.

use firealarm_core::CoreError;
use thiserror::Error;

/// Telegram Bot API failures.
#[derive(Error, Debug)]
pub enum TelegramError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The API answered `ok: false`
    #[error("Telegram API error [{code}]: {description}")]
    Api { code: i64, description: String },

    /// The configured API base is not a usable URL
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs embed the bot token.
        TelegramError::Http(err.without_url())
    }
}

/// Top-level error for bot commands.
#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Telegram(#[from] TelegramError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<firealarm_core::ConfigError> for BotError {
    fn from(err: firealarm_core::ConfigError) -> Self {
        BotError::Core(err.into())
    }
}
