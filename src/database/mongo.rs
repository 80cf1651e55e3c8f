//! MongoDB adapter for [`ReferenceStore`].
//!
//! A path `{collection}/{key}` is the document with `_id = key` in the
//! collection of the same name.

use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::{ClientOptions, Credential, ReplaceOptions};
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::{debug, info};

use super::{ReferenceStore, StorePath};
use crate::config::StoreCredentials;
use crate::errors::{BotError, Result};

/// Store wrapper for MongoDB operations.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: mongodb::Database,
}

impl MongoStore {
    /// Connect to MongoDB and verify the connection with a ping.
    ///
    /// # Errors
    /// Returns error if the URI is invalid or the server is unreachable.
    pub async fn connect(
        uri: &str,
        db_name: &str,
        credentials: Option<&StoreCredentials>,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;

        if let Some(creds) = credentials {
            let mut credential = Credential::default();
            credential.username = Some(creds.username.clone());
            credential.password = Some(creds.password.clone());
            credential.source = creds.source.clone();
            options.credential = Some(credential);
        }

        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Successfully connected to reference store");

        Ok(Self {
            db: client.database(db_name),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

/// A key that sanitized down to nothing cannot address a document.
fn check_key(path: &StorePath) -> Result<()> {
    if path.key().is_empty() {
        return Err(BotError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Convert a JSON object into a BSON document.
fn to_document(value: &Value) -> Result<Document> {
    match bson::to_bson(value)? {
        Bson::Document(doc) => Ok(doc),
        other => Err(BotError::Bson(format!(
            "expected an object, got {:?}",
            other.element_type()
        ))),
    }
}

#[async_trait]
impl ReferenceStore for MongoStore {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>> {
        check_key(path)?;
        let found = self
            .collection(path.collection())
            .find_one(doc! { "_id": path.key() })
            .await?;

        debug!("DB get {}: {:?}", path, found.is_some());

        Ok(found.map(|mut doc| {
            doc.remove("_id");
            Bson::Document(doc).into_relaxed_extjson()
        }))
    }

    async fn write(&self, path: &StorePath, value: &Value) -> Result<()> {
        check_key(path)?;
        let mut doc = to_document(value)?;
        doc.insert("_id", path.key());

        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection(path.collection())
            .replace_one(doc! { "_id": path.key() }, doc)
            .with_options(options)
            .await?;

        debug!("Wrote {}", path);
        Ok(())
    }

    async fn append(&self, collection: &'static str, value: &Value) -> Result<String> {
        let doc = to_document(value)?;
        let result = self.collection(collection).insert_one(doc).await?;

        let key = match result.inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            other => other.to_string(),
        };

        debug!("Appended {}/{}", collection, key);
        Ok(key)
    }
}
