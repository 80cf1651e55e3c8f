//! In-memory [`ReferenceStore`] used by handler tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::{ReferenceStore, StorePath};
use crate::errors::{BotError, Result};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Value>>,
    appended: Mutex<Vec<(String, Value)>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    failing_collections: Mutex<Vec<&'static str>>,
    fail_appends: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record at `collection/key`.
    pub fn with(self, collection: &'static str, key: &str, value: Value) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(StorePath::new(collection, key).to_string(), value);
        self
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Fail reads from one collection only.
    pub fn fail_reads_from(&self, collection: &'static str) {
        self.failing_collections.lock().unwrap().push(collection);
    }

    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }

    pub fn record(&self, collection: &'static str, key: &str) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .get(&StorePath::new(collection, key).to_string())
            .cloned()
    }

    pub fn count(&self, collection: &str) -> usize {
        let prefix = format!("{collection}/");
        self.records
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .count()
    }

    pub fn appended(&self) -> Vec<(String, Value)> {
        self.appended.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Writes and appends combined.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceStore for MemoryStore {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let failing = self.fail_reads.load(Ordering::SeqCst)
            || self
                .failing_collections
                .lock()
                .unwrap()
                .contains(&path.collection());
        if failing {
            return Err(BotError::InvalidPath(format!("read refused: {path}")));
        }
        Ok(self.records.lock().unwrap().get(&path.to_string()).cloned())
    }

    async fn write(&self, path: &StorePath, value: &Value) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .insert(path.to_string(), value.clone());
        Ok(())
    }

    async fn append(&self, collection: &'static str, value: &Value) -> Result<String> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(BotError::InvalidPath(format!("append refused: {collection}")));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut appended = self.appended.lock().unwrap();
        let key = format!("{:06}", appended.len() + 1);
        appended.push((collection.to_string(), value.clone()));
        Ok(key)
    }
}
