use crate::domain::chat::ChatId;
use crate::domain::message::ParseMode;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single chat did not receive the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The transport produced no response at all.
    #[error("Network error: failed to fetch")]
    Network,
    /// A response arrived but its body was not a usable JSON object.
    #[error("API error: invalid json response")]
    Protocol,
    /// Telegram answered with `ok: false`.
    #[error("{description} ({code})")]
    Application { description: String, code: i64 },
}

impl DeliveryError {
    /// Low-cardinality label used for log fields and metric attributes.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Protocol => "protocol",
            Self::Application { .. } => "application",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFailure {
    pub chat: ChatId,
    pub error: DeliveryError,
}

impl Serialize for ChatFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChatFailure", 2)?;
        state.serialize_field("chat", &self.chat)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Aggregate outcome of one batch.
///
/// `Failed` always holds at least one entry; build results with [`SendResult::from_failures`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResult {
    Delivered,
    Failed(Vec<ChatFailure>),
}

impl SendResult {
    #[must_use]
    pub fn from_failures(failures: Vec<ChatFailure>) -> Self {
        if failures.is_empty() { Self::Delivered } else { Self::Failed(failures) }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    #[must_use]
    pub fn failures(&self) -> &[ChatFailure] {
        match self {
            Self::Delivered => &[],
            Self::Failed(failures) => failures,
        }
    }
}

impl Serialize for SendResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SendResult", 2)?;
        match self {
            Self::Delivered => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("errors", &None::<Vec<ChatFailure>>)?;
            }
            Self::Failed(failures) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("errors", failures)?;
            }
        }
        state.end()
    }
}

/// One call to the public entry point: the same content delivered to every chat in `chats`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendRequest {
    pub chats: Vec<ChatId>,
    pub token: String,
    pub content: String,
    #[serde(default)]
    pub mode: Option<ParseMode>,
}
