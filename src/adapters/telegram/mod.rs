use crate::domain::chat::ChatId;
use crate::domain::delivery::DeliveryError;
use crate::domain::message::OutgoingMessage;
use async_trait::async_trait;

pub mod bot_api;

pub use bot_api::TelegramDispatcher;

#[async_trait]
pub trait MessageDispatcher: Send + Sync + std::fmt::Debug {
    /// Performs exactly one delivery attempt of `message` to `chat` against `endpoint`.
    ///
    /// # Errors
    /// Returns the classified [`DeliveryError`] when the chat did not receive the message.
    /// Implementations never retry.
    async fn dispatch(&self, endpoint: &str, chat: &ChatId, message: &OutgoingMessage) -> Result<(), DeliveryError>;
}
