//! Document-store adapter.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{MongoConfig, MongoOperation};
use crate::error::AdapterError;
use crate::log::ExecutionLog;
use crate::result::AdapterOutcome;
use crate::store::DocumentStore;

/// Default bound on FIND result size.
pub const DEFAULT_FIND_LIMIT: usize = 10;

/// Adapter executing one FIND or INSERT against the tenant document store.
pub struct MongoAdapter {
    store: Arc<dyn DocumentStore>,
    find_limit: usize,
}

impl MongoAdapter {
    /// Create an adapter with the default FIND result bound.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_find_limit(store, DEFAULT_FIND_LIMIT)
    }

    /// Create an adapter with a custom FIND result bound.
    pub fn with_find_limit(store: Arc<dyn DocumentStore>, find_limit: usize) -> Self {
        Self { store, find_limit }
    }

    /// Execute the configured operation, appending to the log trail.
    ///
    /// Never fails past this boundary: bad JSON, unsupported operations and
    /// store errors all become a failed outcome with an ERROR log entry.
    pub async fn execute(&self, config: &MongoConfig, logs: &mut Vec<ExecutionLog>) -> AdapterOutcome {
        logs.push(ExecutionLog::info(format!(
            "Executing {} on collection {}",
            config.operation, config.collection
        )));

        match self.run(config).await {
            Ok(result) => {
                logs.push(
                    ExecutionLog::info(format!("{} operation completed", config.operation))
                        .with_payload(result.clone()),
                );
                AdapterOutcome::passed(result)
            }
            Err(e) => {
                tracing::warn!(
                    collection = %config.collection,
                    operation = %config.operation,
                    error = %e,
                    "Document operation failed"
                );
                logs.push(ExecutionLog::error(format!("Document operation failed: {}", e)));
                AdapterOutcome::failed()
            }
        }
    }

    async fn run(&self, config: &MongoConfig) -> Result<Value, AdapterError> {
        match config.operation {
            MongoOperation::Find => {
                let filter: Value = serde_json::from_str(&config.query)?;
                let documents = self.store.find(&config.collection, &filter, self.find_limit).await?;
                Ok(serde_json::json!({ "documents": documents }))
            }
            MongoOperation::Insert => {
                let document: Value = match config.document {
                    Some(ref raw) => serde_json::from_str(raw)?,
                    None => serde_json::json!({}),
                };
                let inserted_id = self.store.insert_one(&config.collection, document).await?;
                Ok(serde_json::json!({ "inserted_id": inserted_id }))
            }
            other => Err(AdapterError::Unsupported(format!(
                "Mongo operation {} is not supported",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogKind;
    use crate::store::MemoryDocumentStore;

    fn config(operation: MongoOperation) -> MongoConfig {
        MongoConfig {
            collection: "orders".to_string(),
            operation,
            query: "{}".to_string(),
            document: None,
            database: "default".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_returns_matched_documents() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .seed(
                "orders",
                vec![
                    serde_json::json!({"status": "open"}),
                    serde_json::json!({"status": "closed"}),
                ],
            )
            .await;

        let adapter = MongoAdapter::new(store);
        let mut cfg = config(MongoOperation::Find);
        cfg.query = "{\"status\": \"open\"}".to_string();

        let mut logs = Vec::new();
        let outcome = adapter.execute(&cfg, &mut logs).await;

        assert!(outcome.is_passed());
        let response = outcome.response.unwrap();
        assert_eq!(response["documents"].as_array().unwrap().len(), 1);
        assert_eq!(logs.len(), 2);
    }

    #[tokio::test]
    async fn test_find_is_bounded() {
        let store = Arc::new(MemoryDocumentStore::new());
        let docs: Vec<Value> = (0..25).map(|i| serde_json::json!({"n": i})).collect();
        store.seed("orders", docs).await;

        let adapter = MongoAdapter::new(store);
        let mut logs = Vec::new();
        let outcome = adapter.execute(&config(MongoOperation::Find), &mut logs).await;

        let response = outcome.response.unwrap();
        assert_eq!(response["documents"].as_array().unwrap().len(), DEFAULT_FIND_LIMIT);
    }

    #[tokio::test]
    async fn test_insert_returns_identity() {
        let store = Arc::new(MemoryDocumentStore::new());
        let adapter = MongoAdapter::new(store.clone());

        let mut cfg = config(MongoOperation::Insert);
        cfg.document = Some("{\"status\": \"open\"}".to_string());

        let mut logs = Vec::new();
        let outcome = adapter.execute(&cfg, &mut logs).await;

        assert!(outcome.is_passed());
        let inserted_id = outcome.response.unwrap()["inserted_id"].as_str().unwrap().to_string();
        assert!(!inserted_id.is_empty());

        let found = store
            .find("orders", &serde_json::json!({"_id": inserted_id}), 10)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_bad_query_json_fails() {
        let adapter = MongoAdapter::new(Arc::new(MemoryDocumentStore::new()));
        let mut cfg = config(MongoOperation::Find);
        cfg.query = "not json".to_string();

        let mut logs = Vec::new();
        let outcome = adapter.execute(&cfg, &mut logs).await;

        assert!(outcome.status.is_failed());
        assert!(outcome.response.is_none());
        assert_eq!(logs.last().unwrap().kind, LogKind::Error);
    }

    #[tokio::test]
    async fn test_unsupported_operation_fails() {
        let adapter = MongoAdapter::new(Arc::new(MemoryDocumentStore::new()));

        for operation in [MongoOperation::Update, MongoOperation::Delete, MongoOperation::Aggregate] {
            let mut logs = Vec::new();
            let outcome = adapter.execute(&config(operation), &mut logs).await;

            assert!(outcome.status.is_failed());
            let last = logs.last().unwrap();
            assert_eq!(last.kind, LogKind::Error);
            assert!(last.message.contains("not supported"));
        }
    }
}
