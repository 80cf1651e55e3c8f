//! /daftar command plugin.
//!
//! Files a pending registration for senders that are not officers yet.
//! Repeating the command overwrites the pending request at the same key.

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::bot::update::InboundMessage;
use crate::database::StorePath;
use crate::database::models::{RegistrationRequest, collections};
use crate::errors::Result;
use crate::texts;

/// Handle the /daftar command.
pub async fn daftar_handler(state: &AppState, msg: &InboundMessage) -> Result<()> {
    let key = msg.sender_id.to_string();

    let officer = state
        .store
        .get(&StorePath::new(collections::OFFICERS, &key))
        .await?;

    if officer.is_some() {
        return state.reply(msg, texts::ALREADY_REGISTERED).await;
    }

    let request = RegistrationRequest::pending(
        &msg.display_name,
        msg.handle.as_deref(),
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    state
        .store
        .write(
            &StorePath::new(collections::REGISTRATIONS, &key),
            &serde_json::to_value(&request)?,
        )
        .await?;

    info!("Registration request filed for {} ({})", msg.sender_id, request.username);

    state.reply(msg, texts::REGISTRATION_SUBMITTED).await
}
