use crate::domain::chat::ChatId;
use crate::domain::message::ParseMode;
use crate::services::broadcast_service::DEFAULT_API_BASE_URL;
use clap::{Args, Parser, ValueEnum};
use std::str::FromStr;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Bot API token issued by @BotFather
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Comma-separated list of chat ids or @usernames to deliver to
    #[arg(
        long = "chat",
        env = "TELEGRAM_CHAT_IDS",
        value_delimiter = ',',
        value_parser = ChatId::from_str,
        required = true,
        allow_hyphen_values = true
    )]
    pub chats: Vec<ChatId>,

    /// Formatting mode for the message text (HTML when omitted)
    #[arg(long, env = "TELEGRAM_PARSE_MODE", value_enum)]
    pub mode: Option<ParseMode>,

    /// Base URL of the Bot API server
    #[arg(long, env = "TELEGRAM_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Message text, or `-` to read it from stdin
    pub content: String,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "TELEGRAM_SENDER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, env = "TELEGRAM_SENDER_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// OTLP collector endpoint for traces and metrics
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }

    /// Whether the message text should be read from stdin instead of the command line.
    #[must_use]
    pub fn content_from_stdin(&self) -> bool {
        self.content == "-"
    }
}
