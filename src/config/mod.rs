//! Configuration module for the Appendiks bot.
//!
//! Loads configuration from environment variables.

use std::env;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use thiserror::Error;

/// Default HTTP port when `PORT` is not set.
const DEFAULT_PORT: u16 = 8080;

/// Default inbound webhook route.
const DEFAULT_WEBHOOK_PATH: &str = "/api/webhook";

/// Errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Credentials for the reference store, decoded from `STORE_KEY_BASE64`.
///
/// The blob is base64 of a JSON object:
/// `{"username": "...", "password": "...", "source": "admin"}`.
#[derive(Clone, Deserialize)]
pub struct StoreCredentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("source", &self.source)
            .finish()
    }
}

impl StoreCredentials {
    /// Decode a base64 credential blob.
    pub fn from_base64(blob: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            name: "STORE_KEY_BASE64",
            reason,
        };

        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|e| invalid(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| invalid(e.to_string()))
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    /// Public URL Telegram should deliver updates to.
    /// When set, `setWebhook` is called on startup.
    pub webhook_url: Option<String>,

    /// Shared secret Telegram echoes back in `X-Telegram-Bot-Api-Secret-Token`.
    pub webhook_secret: Option<String>,

    /// Route the webhook handler is mounted on.
    pub webhook_path: String,

    pub port: u16,

    /// Chat that receives error notifications.
    /// Falls back to the sender's chat when unset.
    pub admin_chat_id: Option<i64>,

    // Reference store
    pub store_url: String,
    pub store_database: String,
    pub store_credentials: Option<StoreCredentials>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let store_url = get("STORE_URL").ok_or(ConfigError::Missing("STORE_URL"))?;

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let admin_chat_id = match get("ADMIN_CHAT_ID") {
            Some(raw) => Some(raw.parse::<i64>().map_err(|e| ConfigError::Invalid {
                name: "ADMIN_CHAT_ID",
                reason: e.to_string(),
            })?),
            None => None,
        };

        let store_credentials = get("STORE_KEY_BASE64")
            .map(|blob| StoreCredentials::from_base64(&blob))
            .transpose()?;

        // Route must be absolute for axum
        let webhook_path = get("WEBHOOK_PATH")
            .map(|p| if p.starts_with('/') { p } else { format!("/{p}") })
            .unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string());

        Ok(Self {
            bot_token,
            webhook_url: get("WEBHOOK_URL"),
            webhook_secret: get("WEBHOOK_SECRET"),
            webhook_path,
            port,
            admin_chat_id,
            store_url,
            store_database: get("STORE_DATABASE").unwrap_or_else(|| "appendiks".to_string()),
            store_credentials,
        })
    }
}
