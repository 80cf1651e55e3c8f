//! Crate error type.
//!
//! Collaborator failures are mapped into [`BotError`] so the webhook
//! boundary can log them and report `ok: false` uniformly.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("document conversion error: {0}")]
    Bson(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("messaging error: {0}")]
    Messaging(#[from] teloxide::RequestError),

    #[error("invalid store path: {0}")]
    InvalidPath(String),
}

impl From<mongodb::bson::ser::Error> for BotError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        Self::Bson(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
