use thiserror::Error;

/// Failures that stop the process before or around a batch.
///
/// Per-chat delivery problems are never reported here; they live in
/// [`SendResult`](crate::domain::delivery::SendResult).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Failed to read message from stdin: {0}")]
    Input(#[source] std::io::Error),
    #[error("Message content is empty")]
    EmptyContent,
    #[error("Failed to encode result: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Failed to write result to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
