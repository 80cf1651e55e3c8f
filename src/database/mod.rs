//! Reference store access.
//!
//! The bot only needs three operations against its store: read a record by
//! key, overwrite a record at a key, and append a record under a generated
//! key. [`ReferenceStore`] is that port; [`MongoStore`] is the production
//! adapter.

#[cfg(test)]
pub mod memory;
pub mod models;
mod mongo;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;
use crate::errors::Result;

pub use mongo::MongoStore;

/// Characters the store refuses inside a key.
const ILLEGAL_KEY_CHARS: [char; 5] = ['.', '#', '$', '[', ']'];

/// Strip characters that are illegal in store keys.
pub fn sanitize_key(key: &str) -> String {
    key.chars().filter(|c| !ILLEGAL_KEY_CHARS.contains(c)).collect()
}

/// Location of a single record: `{collection}/{key}`.
///
/// The key is sanitized on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePath {
    collection: &'static str,
    key: String,
}

impl StorePath {
    pub fn new(collection: &'static str, key: impl AsRef<str>) -> Self {
        Self {
            collection,
            key: sanitize_key(key.as_ref()),
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}

/// Key-value document store holding lookup tables and accumulated records.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Read the record at `path`, `None` when absent.
    async fn get(&self, path: &StorePath) -> Result<Option<Value>>;

    /// Create or overwrite the record at `path`.
    async fn write(&self, path: &StorePath, value: &Value) -> Result<()>;

    /// Add a record to `collection` under a fresh unique key, returning the key.
    async fn append(&self, collection: &'static str, value: &Value) -> Result<String>;
}

static STORE: OnceCell<MongoStore> = OnceCell::const_new();

/// Connect the process-wide store.
///
/// Idempotent: the first successful call connects, later calls return the
/// same handle. A failed attempt leaves the cell empty so it can be retried.
pub async fn init(config: &Config) -> Result<&'static MongoStore> {
    STORE
        .get_or_try_init(|| async {
            info!("Connecting to reference store...");
            MongoStore::connect(
                &config.store_url,
                &config.store_database,
                config.store_credentials.as_ref(),
            )
            .await
        })
        .await
}
