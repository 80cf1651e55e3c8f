//! Appendiks - fish landing recorder bot.
//!
//! Field enumerators send landing reports to a Telegram bot as
//! `Key : value` lines. The bot checks the sender is a registered officer,
//! validates the report against vessel/gear/species reference tables and
//! appends it to the landing log.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - Reference store port and MongoDB adapter
//! - `landing` - Submission parsing and validation
//! - `bot` - Update decoding, messaging, dispatcher and webhook server
//! - `plugins` - Command handlers
//! - `texts` - Reply texts

mod bot;
mod config;
mod database;
mod errors;
mod landing;
mod plugins;
mod texts;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::{AppState, TelegramMessenger};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("appendiks_bot=info,teloxide=warn,mongodb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Appendiks bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    match config.admin_chat_id {
        Some(id) => info!("Error notifications go to chat {}", id),
        None => info!("No ADMIN_CHAT_ID configured, errors are reported to the sender"),
    }

    let store = database::init(&config).await?;
    info!("Reference store ready (database {})", config.store_database);

    // Throttle keeps replies within Telegram's rate limits
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(TelegramMessenger::new(bot.clone())),
        config.admin_chat_id,
    );

    bot::run(&config, &bot, state).await
}
