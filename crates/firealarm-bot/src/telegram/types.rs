//! The subset of Telegram Bot API objects the bot reads and writes.

use serde::{Deserialize, Serialize};

use crate::error::TelegramError;

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, TelegramError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(TelegramError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or_else(|| "response without result".to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_message_update() {
        let json = r#"{
            "update_id": 10,
            "message": {
                "message_id": 3,
                "date": 1700000000,
                "chat": { "id": -100, "type": "group" },
                "from": { "id": 123, "is_bot": false, "first_name": "Ann" },
                "text": "/check 5"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, -100);
        assert_eq!(message.from.map(|u| u.id), Some(123));
        assert_eq!(message.text.as_deref(), Some("/check 5"));
    }

    #[test]
    fn error_response_maps_to_api_error() {
        let json = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        let resp: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        match resp.into_result() {
            Err(TelegramError::Api { code, description }) => {
                assert_eq!(code, 401);
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn get_updates_request_omits_missing_offset() {
        let body = serde_json::to_value(GetUpdatesRequest {
            offset: None,
            timeout: 30,
            allowed_updates: &["message"],
        })
        .unwrap();
        assert!(body.get("offset").is_none());
        assert_eq!(body["allowed_updates"][0], "message");
    }
}
