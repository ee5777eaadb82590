use super::MessageDispatcher;
use crate::domain::chat::ChatId;
use crate::domain::delivery::DeliveryError;
use crate::domain::message::{OutgoingMessage, ParseMode};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Delivers messages through the Telegram Bot API `sendMessage` method.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct TelegramDispatcher {
    client: reqwest::Client,
}

impl TelegramDispatcher {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    parse_mode: ParseMode,
}

/// Reads a decoded `sendMessage` response.
///
/// A falsy body (`null`, `false`, `0`, `""`) carries no answer at all. Any other body is a
/// success only when `ok` is `true`; otherwise it is a rejection described by whatever
/// `description` and `error_code` it holds.
fn classify(body: &Value) -> Result<(), DeliveryError> {
    if is_falsy(body) {
        return Err(DeliveryError::Protocol);
    }
    if body["ok"] == Value::Bool(true) {
        return Ok(());
    }

    let description = match &body["description"] {
        Value::Null => "Unknown error".to_string(),
        Value::String(description) => description.clone(),
        other => other.to_string(),
    };
    let code = match &body["error_code"] {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Err(DeliveryError::Application { description, code: code.unwrap_or_default() })
}

fn is_falsy(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[async_trait]
impl MessageDispatcher for TelegramDispatcher {
    async fn dispatch(&self, endpoint: &str, chat: &ChatId, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let body = SendMessageBody { chat_id: chat, text: &message.text, parse_mode: message.mode };

        let response = match self.client.post(endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "Request failed before a response was received");
                return Err(DeliveryError::Network);
            }
        };

        // Only the `ok` flag decides the outcome, whatever the HTTP status.
        let status = response.status();
        match response.json::<Value>().await {
            Ok(body) => {
                let outcome = classify(&body);
                if outcome == Err(DeliveryError::Protocol) {
                    tracing::debug!(status = %status, "Response body held no value");
                }
                outcome
            }
            Err(e) => {
                tracing::debug!(status = %status, error = %e, "Response body was not valid JSON");
                Err(DeliveryError::Protocol)
            }
        }
    }
}
