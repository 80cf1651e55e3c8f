//! Inbound Telegram update decoding.
//!
//! Only the handful of fields the bot reads are modelled. Anything that
//! fails to decode, or carries no text, is a non-actionable event.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WebhookUpdate {
    #[serde(default)]
    message: Option<IncomingMessage>,
    #[serde(default)]
    edited_message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    chat: ChatRef,
    from: Option<Sender>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatRef {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Sender {
    id: u64,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// A text message the bot should act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender_id: u64,
    pub chat_id: i64,
    /// Trimmed, never empty.
    pub text: String,
    /// `first last`, trimmed; may be empty.
    pub display_name: String,
    pub handle: Option<String>,
}

impl InboundMessage {
    /// Handle when present, otherwise the display name.
    pub fn identity(&self) -> String {
        self.handle
            .clone()
            .unwrap_or_else(|| self.display_name.clone())
    }
}

/// Decode a webhook body into an actionable message.
///
/// A new message takes precedence over an edited one.
pub fn decode(body: &[u8]) -> Option<InboundMessage> {
    if body.is_empty() {
        return None;
    }

    let update: WebhookUpdate = serde_json::from_slice(body).ok()?;
    let message = update.message.or(update.edited_message)?;
    let sender = message.from?;

    let text = message.text?.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let display_name = format!(
        "{} {}",
        sender.first_name.unwrap_or_default(),
        sender.last_name.unwrap_or_default()
    )
    .trim()
    .to_string();

    Some(InboundMessage {
        sender_id: sender.id,
        chat_id: message.chat.id,
        text,
        display_name,
        handle: sender.username.filter(|u| !u.is_empty()),
    })
}
