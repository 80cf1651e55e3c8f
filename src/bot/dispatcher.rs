//! Message dispatcher.
//!
//! Routes an inbound message to its command handler and converts any
//! handler failure into a logged error, a best-effort admin notification
//! and an `ok: false` acknowledgment.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, warn};

use super::messenger::{Messenger, TextMode};
use super::update::InboundMessage;
use crate::database::ReferenceStore;
use crate::errors::{BotError, Result};
use crate::plugins::{self, Command};
use crate::texts;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Reference store for officers, lookups and records.
    pub store: Arc<dyn ReferenceStore>,

    /// Outbound messaging gateway.
    pub messenger: Arc<dyn Messenger>,

    /// Chat that receives error notifications.
    pub admin_chat_id: Option<i64>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ReferenceStore>,
        messenger: Arc<dyn Messenger>,
        admin_chat_id: Option<i64>,
    ) -> Self {
        Self {
            store,
            messenger,
            admin_chat_id,
        }
    }

    /// Reply to the chat the message came from.
    pub async fn reply(&self, msg: &InboundMessage, text: &str) -> Result<()> {
        self.messenger
            .send_text(msg.chat_id, text, TextMode::Markdown)
            .await
    }
}

/// Transport-level acknowledgment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Handle one message. Never fails: errors become `Ack { ok: false }`.
pub async fn handle_message(state: &AppState, msg: &InboundMessage) -> Ack {
    match dispatch(state, msg).await {
        Ok(()) => Ack::ok(),
        Err(e) => {
            error!("Error handling message from {}: {}", msg.sender_id, e);
            notify_admin(state, msg, &e).await;
            Ack::failed(e.to_string())
        }
    }
}

async fn dispatch(state: &AppState, msg: &InboundMessage) -> Result<()> {
    let command = Command::parse(&msg.text);
    debug!("Dispatching {:?} from {}", command, msg.sender_id);

    match command {
        Some(Command::Start) => plugins::start::start_handler(state, msg).await,
        Some(Command::Format) => plugins::format::format_handler(state, msg).await,
        Some(Command::Daftar) => plugins::daftar::daftar_handler(state, msg).await,
        None => plugins::submission::submission_handler(state, msg).await,
    }
}

/// Report a failure to the admin chat, or to the sender when none is set.
async fn notify_admin(state: &AppState, msg: &InboundMessage, err: &BotError) {
    let chat_id = state.admin_chat_id.unwrap_or(msg.sender_id as i64);

    if let Err(e) = state
        .messenger
        .send_text(chat_id, &texts::bot_error(&err.to_string()), TextMode::Plain)
        .await
    {
        warn!("Failed to notify chat {} about error: {}", chat_id, e);
    }
}
