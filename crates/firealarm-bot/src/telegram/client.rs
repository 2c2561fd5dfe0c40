//! Minimal Telegram Bot API client: long-poll for updates, send text.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::types::{ApiResponse, GetUpdatesRequest, SendMessageRequest, Update};
use crate::error::TelegramError;

/// Slack on top of the long-poll timeout before the HTTP request gives up.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    http: Client,
    /// `{api_base}/bot{token}/`
    base: Url,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns an error if `api_base` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        let mut base = Url::parse(api_base)?;
        // Pushed as a segment: `join` would read "bot123:abc" as a scheme.
        base.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(&format!("bot{token}"))
            .push("");
        let http = Client::builder()
            .timeout(poll_timeout.saturating_add(REQUEST_GRACE))
            .build()?;
        Ok(Self { http, base })
    }

    /// Wait up to `timeout` for new updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &GetUpdatesRequest {
                offset,
                timeout: timeout.as_secs(),
                allowed_updates: &["message"],
            },
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let _: serde_json::Value = self
            .call("sendMessage", &SendMessageRequest { chat_id, text })
            .await?;
        Ok(())
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base.join(method)?;
        let response: ApiResponse<T> = self.http.post(url).json(body).send().await?.json().await?;
        response.into_result()
    }
}
