#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use adapters::telegram::TelegramDispatcher;
use domain::delivery::{SendRequest, SendResult};
use services::broadcast_service::{BroadcastService, DEFAULT_API_BASE_URL};
use std::sync::Arc;

/// Sends `request.content` to every chat of `request` through the public Bot API.
///
/// Uses a fresh default HTTP client; build a [`BroadcastService`] directly to share a client
/// across calls or to target another Bot API server.
pub async fn send_message(request: &SendRequest) -> SendResult {
    let service = BroadcastService::new(Arc::new(TelegramDispatcher::default()), DEFAULT_API_BASE_URL);
    service.send(request).await
}
