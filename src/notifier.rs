use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error};

use crate::error::BotError;

/// Outbound channel for status updates and alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), BotError>;
}

/// Sends messages to a single Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    /// `chat_id` is either a numeric chat id or a `@channel` username.
    pub fn new(bot: Bot, chat_id: &str) -> Self {
        let chat = match chat_id.trim().parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
        };
        Self { bot, chat }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), BotError> {
        debug!("Sending message to {:?}", self.chat);

        match self.bot.send_message(self.chat.clone(), message).await {
            Ok(_) => {
                debug!("Message sent: {}", message);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send message {:?}: {}", message, e);
                Err(BotError::SendFailure(e.to_string()))
            }
        }
    }
}
