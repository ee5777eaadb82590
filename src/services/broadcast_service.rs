use crate::adapters::telegram::MessageDispatcher;
use crate::domain::chat::ChatId;
use crate::domain::delivery::{ChatFailure, SendRequest, SendResult};
use crate::domain::message::OutgoingMessage;
use futures::future::join_all;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::sync::Arc;
use tracing::Instrument;

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

#[derive(Clone, Debug)]
struct Metrics {
    sent: Counter<u64>,
    failures: Counter<u64>,
    batch_size: Histogram<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("telegram-sender");
        Self {
            sent: meter
                .u64_counter("telegram_messages_sent_total")
                .with_description("Total number of messages accepted by the Bot API")
                .build(),
            failures: meter
                .u64_counter("telegram_message_failures_total")
                .with_description("Total number of per-chat delivery failures")
                .build(),
            batch_size: meter
                .u64_histogram("telegram_batch_size")
                .with_description("Number of chats targeted by a single send")
                .build(),
        }
    }
}

/// Fans one message out to every chat of a request and folds the outcomes into a [`SendResult`].
#[derive(Clone, Debug)]
pub struct BroadcastService {
    dispatcher: Arc<dyn MessageDispatcher>,
    api_base_url: String,
    metrics: Metrics,
}

impl BroadcastService {
    pub fn new(dispatcher: Arc<dyn MessageDispatcher>, api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self { dispatcher, api_base_url, metrics: Metrics::new() }
    }

    /// The `sendMessage` URL for `token`. Every chat of a batch is sent to this same URL.
    #[must_use]
    pub fn endpoint(&self, token: &str) -> String {
        format!("{}/bot{token}/sendMessage", self.api_base_url)
    }

    /// Sends `request.content` to every chat in `request.chats`.
    ///
    /// Never fails as a whole: every per-chat error is captured in the returned result.
    #[tracing::instrument(level = "debug", skip(self, request), fields(chats = request.chats.len()))]
    pub async fn send(&self, request: &SendRequest) -> SendResult {
        let endpoint = self.endpoint(&request.token);
        let message = OutgoingMessage::new(request.content.as_str(), request.mode);
        self.send_batch(&request.chats, &endpoint, &message).await
    }

    async fn send_batch(&self, chats: &[ChatId], endpoint: &str, message: &OutgoingMessage) -> SendResult {
        self.metrics.batch_size.record(u64::try_from(chats.len()).unwrap_or(u64::MAX), &[]);

        // All dispatches are built up front and polled together; join_all keeps input order.
        let dispatches = chats.iter().map(|chat| {
            let dispatcher = &self.dispatcher;
            async move {
                let outcome = dispatcher.dispatch(endpoint, chat, message).await;
                match &outcome {
                    Ok(()) => tracing::debug!("Message delivered"),
                    Err(e) => tracing::warn!(reason = e.reason(), error = %e, "Message not delivered"),
                }
                (chat, outcome)
            }
            .instrument(tracing::debug_span!("dispatch_message", chat = %chat))
        });
        let outcomes = join_all(dispatches).await;

        let failures: Vec<ChatFailure> = outcomes
            .into_iter()
            .filter_map(|(chat, outcome)| match outcome {
                Ok(()) => {
                    self.metrics.sent.add(1, &[]);
                    None
                }
                Err(error) => {
                    self.metrics.failures.add(1, &[KeyValue::new("reason", error.reason())]);
                    Some(ChatFailure { chat: chat.clone(), error })
                }
            })
            .collect();

        tracing::info!(total = chats.len(), failed = failures.len(), "Batch finished");
        SendResult::from_failures(failures)
    }
}
