use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Telegram formatting modes accepted in the `parse_mode` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ParseMode {
    #[default]
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "MarkdownV2")]
    MarkdownV2,
    #[serde(rename = "Markdown")]
    Markdown,
}

/// The payload shared by every chat in one batch.
///
/// Content is not checked against the parse mode; Telegram rejects malformed markup itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub mode: ParseMode,
}

impl OutgoingMessage {
    #[must_use]
    pub fn new(text: impl Into<String>, mode: Option<ParseMode>) -> Self {
        Self { text: text.into(), mode: mode.unwrap_or_default() }
    }
}
