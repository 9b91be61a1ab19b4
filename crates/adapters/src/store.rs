//! Tenant document store seam.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::error::AdapterError;

/// Capability over the organization's underlying document store.
///
/// The mongo adapter consumes this instead of holding a driver handle, so
/// the store can be substituted with an in-memory fake in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find documents matching the filter, bounded by `limit`.
    async fn find(
        &self,
        collection: &str,
        filter: &Value,
        limit: usize,
    ) -> Result<Vec<Value>, AdapterError>;

    /// Insert one document and return its generated identity.
    async fn insert_one(&self, collection: &str, document: Value) -> Result<String, AdapterError>;
}

/// In-memory document store with equality-match filter semantics.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with documents.
    pub async fn seed(&self, collection: &str, documents: Vec<Value>) {
        let mut collections = self.collections.lock().await;
        collections.entry(collection.to_string()).or_default().extend(documents);
    }
}

fn matches_filter(document: &Value, filter: &Value) -> bool {
    match filter.as_object() {
        // Every filter field must be equal on the document; an empty
        // filter matches everything.
        Some(fields) => fields.iter().all(|(key, expected)| document.get(key) == Some(expected)),
        None => false,
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Value,
        limit: usize,
    ) -> Result<Vec<Value>, AdapterError> {
        let collections = self.collections.lock().await;
        let documents = collections.get(collection).map(Vec::as_slice).unwrap_or_default();

        Ok(documents
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<String, AdapterError> {
        let mut document = document;
        let id = match document.get("_id").and_then(Value::as_str) {
            Some(existing) => existing.to_string(),
            None => {
                let generated = uuid::Uuid::new_v4().to_string();
                if let Some(fields) = document.as_object_mut() {
                    fields.insert("_id".to_string(), Value::String(generated.clone()));
                }
                generated
            }
        };

        let mut collections = self.collections.lock().await;
        collections.entry(collection.to_string()).or_default().push(document);
        Ok(id)
    }
}
