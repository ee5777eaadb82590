use crate::adapters::telegram::TelegramDispatcher;
use crate::config::Config;
use crate::domain::delivery::{SendRequest, SendResult};
use crate::error::{AppError, Result};
use crate::services::broadcast_service::BroadcastService;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::Instrument;

/// Runs one send as configured on the command line, reading the message from `stdin` when
/// the content argument is `-`.
///
/// # Errors
/// Returns an error if the message cannot be read or the HTTP client cannot be built.
/// Per-chat delivery failures are part of the returned [`SendResult`].
pub async fn run<R>(config: &Config, stdin: R) -> Result<SendResult>
where
    R: AsyncRead + Unpin,
{
    let content = read_content(config, stdin).await?;

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let service = BroadcastService::new(Arc::new(TelegramDispatcher::new(client)), config.api_base_url.as_str());

    let request = SendRequest { chats: config.chats.clone(), token: config.token.clone(), content, mode: config.mode };
    Ok(service.send(&request).instrument(tracing::info_span!("send_message")).await)
}

async fn read_content<R>(config: &Config, mut stdin: R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    if !config.content_from_stdin() {
        return Ok(config.content.clone());
    }

    let mut content = String::new();
    stdin.read_to_string(&mut content).await.map_err(AppError::Input)?;
    let content = content.trim_end_matches(['\r', '\n']);
    if content.is_empty() {
        return Err(AppError::EmptyContent);
    }
    Ok(content.to_string())
}

/// Writes `result` as one line of JSON.
///
/// # Errors
/// Returns [`AppError::Stdout`] if `out` rejects the write.
pub fn write_result<W: Write>(result: &SendResult, out: &mut W) -> Result<()> {
    let mut line = serde_json::to_vec(result)?;
    line.push(b'\n');
    out.write_all(&line).map_err(AppError::Stdout)?;
    out.flush().map_err(AppError::Stdout)
}

/// Process exit status for `result`: `0` when every chat was delivered, `1` otherwise.
#[must_use]
pub const fn exit_status(result: &SendResult) -> u8 {
    if result.is_ok() { 0 } else { 1 }
}
