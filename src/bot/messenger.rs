//! Outbound messaging gateway.

use async_trait::async_trait;
use teloxide::adaptors::Throttle;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::errors::Result;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// How the platform should render a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Markdown,
    Plain,
}

/// Sends text to a chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str, mode: TextMode) -> Result<()>;
}

/// Telegram implementation backed by teloxide.
pub struct TelegramMessenger {
    bot: ThrottledBot,
}

impl TelegramMessenger {
    pub fn new(bot: ThrottledBot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, text: &str, mode: TextMode) -> Result<()> {
        let request = self.bot.send_message(ChatId(chat_id), text.to_string());

        match mode {
            // Legacy Markdown keeps the templates readable without MarkdownV2 escaping
            #[allow(deprecated)]
            TextMode::Markdown => request.parse_mode(ParseMode::Markdown).await?,
            TextMode::Plain => request.await?,
        };

        Ok(())
    }
}
