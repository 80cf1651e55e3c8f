//! /start command plugin.
//!
//! Sends the onboarding help text.

use crate::bot::dispatcher::AppState;
use crate::bot::update::InboundMessage;
use crate::errors::Result;
use crate::texts;

/// Handle the /start command.
pub async fn start_handler(state: &AppState, msg: &InboundMessage) -> Result<()> {
    state.reply(msg, texts::START).await
}
