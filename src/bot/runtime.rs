//! Bot runtime: webhook registration and the HTTP server.

use std::net::SocketAddr;

use teloxide::prelude::*;
use tokio::net::TcpListener;
use tracing::{info, warn};
use url::Url;

use super::dispatcher::AppState;
use super::messenger::ThrottledBot;
use super::webhook;
use crate::config::Config;

/// Register the webhook (when configured) and serve updates until Ctrl+C.
pub async fn run(config: &Config, bot: &ThrottledBot, state: AppState) -> anyhow::Result<()> {
    if let Some(webhook_url) = &config.webhook_url {
        register_webhook(config, bot, webhook_url).await?;
    } else {
        info!("WEBHOOK_URL not set, assuming the webhook is registered externally");
    }

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;

    info!("📡 Listening on: {} (route {})", address, config.webhook_path);

    let router = webhook::router(state, &config.webhook_path, config.webhook_secret.clone());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Point Telegram at `WEBHOOK_URL`.
async fn register_webhook(config: &Config, bot: &ThrottledBot, webhook_url: &str) -> anyhow::Result<()> {
    let url = Url::parse(webhook_url)?;

    let mut request = bot.set_webhook(url.clone());
    if let Some(secret) = &config.webhook_secret {
        request = request.secret_token(secret.clone());
        info!("Webhook secret token configured");
    }
    request.await?;

    info!("🔗 Webhook set: {}", url);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, run until killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
