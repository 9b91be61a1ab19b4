//! Workitem, testcase and testsuite executors.
//!
//! Each run is a sequential chain: resolve the definition, allocate a run
//! id, dispatch (directly to an adapter, or child by child for composite
//! runs), persist the audit, update the parent definition's last-run
//! summary. A run's status moves PENDING → PASSED | FAILED and a run
//! always produces a persisted audit unless the target itself was not
//! found.

use std::sync::Arc;

use chrono::Utc;
use testdeck_adapters::{AdapterOutcome, AdapterSet, DocumentStore, ExecutionLog, ExecutionStatus};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ids::IdAllocator;
use crate::model::{
    Environment, LastRun, RunTestcaseAudit, RunTestsuiteAudit, RunWorkitemAudit, WorkitemRunResult,
};
use crate::store::{AuditStore, CounterStore, DefinitionStore};

/// The execution engine: three executors over injected storage seams.
pub struct Runner {
    definitions: Arc<dyn DefinitionStore>,
    audits: Arc<dyn AuditStore>,
    ids: IdAllocator,
    adapters: AdapterSet,
}

impl Runner {
    /// Create a runner with default adapter settings.
    pub fn new(
        definitions: Arc<dyn DefinitionStore>,
        audits: Arc<dyn AuditStore>,
        counters: Arc<dyn CounterStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            definitions,
            audits,
            ids: IdAllocator::new(counters),
            adapters: AdapterSet::new(documents),
        }
    }

    /// Create a runner with explicit adapter settings.
    pub fn with_config(
        definitions: Arc<dyn DefinitionStore>,
        audits: Arc<dyn AuditStore>,
        counters: Arc<dyn CounterStore>,
        documents: Arc<dyn DocumentStore>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            definitions,
            audits,
            ids: IdAllocator::new(counters),
            adapters: AdapterSet::with_settings(documents, config.http_timeout, config.find_limit),
        }
    }

    /// Run a single workitem and persist its audit.
    ///
    /// Fails with [`EngineError::NotFound`] if the definition is missing or
    /// soft-deleted; every other failure (unsupported type, absent config,
    /// adapter error) degrades to a FAILED, fully-audited run.
    pub async fn run_workitem(
        &self,
        organization_id: &str,
        workitem_id: &str,
        environment: Environment,
        actor: &str,
    ) -> Result<RunWorkitemAudit, EngineError> {
        let workitem = self
            .definitions
            .workitem(organization_id, workitem_id)
            .await?
            .ok_or_else(|| EngineError::not_found("workitem", workitem_id))?;

        let run_id = self.ids.run_workitem_id().await?;
        let started_at = Utc::now();

        tracing::info!(
            run_id = %run_id,
            workitem_id = %workitem.workitem_id,
            kind = %workitem.kind,
            environment = %environment,
            "Running workitem"
        );

        let mut logs = vec![ExecutionLog::info(format!(
            "Starting execution for workitem {} ({})",
            workitem.title, workitem.kind
        ))];

        let outcome = match workitem.adapter_spec() {
            Some(spec) => self.adapters.execute(spec, &mut logs).await,
            None => {
                logs.push(ExecutionLog::error(format!(
                    "Workitem {} has no {} configuration",
                    workitem.workitem_id, workitem.kind
                )));
                AdapterOutcome::failed()
            }
        };

        let finished_at = Utc::now();
        let audit = RunWorkitemAudit {
            run_id: run_id.clone(),
            organization_id: organization_id.to_string(),
            workitem_id: workitem.workitem_id.clone(),
            workitem_title: workitem.title.clone(),
            environment,
            status: outcome.status,
            config_snapshot: workitem.snapshot(),
            logs,
            response: outcome.response,
            actor: actor.to_string(),
            started_at,
            finished_at,
        };

        self.audits.append_workitem(&audit).await?;
        self.definitions
            .update_workitem_last_run(
                organization_id,
                workitem_id,
                LastRun {
                    status: audit.status,
                    run_id,
                    at: finished_at,
                    by: actor.to_string(),
                },
            )
            .await?;

        Ok(audit)
    }

    /// Run a testcase: its workitems in order, strictly sequentially.
    ///
    /// There is no early termination; all workitems run regardless of
    /// earlier failures, and the composite audit holds every child result
    /// in input order.
    pub async fn run_testcase(
        &self,
        organization_id: &str,
        testcase_id: &str,
        environment: Environment,
        actor: &str,
    ) -> Result<RunTestcaseAudit, EngineError> {
        let testcase = self
            .definitions
            .testcase(organization_id, testcase_id)
            .await?
            .ok_or_else(|| EngineError::not_found("testcase", testcase_id))?;

        let run_id = self.ids.run_testcase_id().await?;
        let started_at = Utc::now();

        tracing::info!(
            run_id = %run_id,
            testcase_id = %testcase.testcase_id,
            workitems = testcase.workitem_ids.len(),
            environment = %environment,
            "Running testcase"
        );

        let mut results: Vec<WorkitemRunResult> = Vec::with_capacity(testcase.workitem_ids.len());
        for workitem_id in &testcase.workitem_ids {
            let child = self
                .run_workitem(organization_id, workitem_id, environment, actor)
                .await?;
            results.push(child.to_result());
        }

        let status = overall_status(results.iter().map(|r| r.status));
        let finished_at = Utc::now();

        let audit = RunTestcaseAudit {
            run_id: run_id.clone(),
            organization_id: organization_id.to_string(),
            testcase_id: testcase.testcase_id.clone(),
            testcase_title: testcase.title.clone(),
            environment,
            status,
            workitem_results: results,
            actor: actor.to_string(),
            started_at,
            finished_at,
        };

        self.audits.append_testcase(&audit).await?;
        self.definitions
            .update_testcase_last_run(
                organization_id,
                testcase_id,
                LastRun {
                    status,
                    run_id,
                    at: finished_at,
                    by: actor.to_string(),
                },
            )
            .await?;

        Ok(audit)
    }

    /// Run a testsuite: its testcases in order, strictly sequentially.
    pub async fn run_testsuite(
        &self,
        organization_id: &str,
        testsuite_id: &str,
        environment: Environment,
        actor: &str,
    ) -> Result<RunTestsuiteAudit, EngineError> {
        let testsuite = self
            .definitions
            .testsuite(organization_id, testsuite_id)
            .await?
            .ok_or_else(|| EngineError::not_found("testsuite", testsuite_id))?;

        let run_id = self.ids.run_testsuite_id().await?;
        let started_at = Utc::now();

        tracing::info!(
            run_id = %run_id,
            testsuite_id = %testsuite.testsuite_id,
            testcases = testsuite.testcase_ids.len(),
            environment = %environment,
            "Running testsuite"
        );

        let mut results: Vec<RunTestcaseAudit> = Vec::with_capacity(testsuite.testcase_ids.len());
        for testcase_id in &testsuite.testcase_ids {
            let child = self
                .run_testcase(organization_id, testcase_id, environment, actor)
                .await?;
            results.push(child);
        }

        let status = overall_status(results.iter().map(|r| r.status));
        let finished_at = Utc::now();

        let audit = RunTestsuiteAudit {
            run_id: run_id.clone(),
            organization_id: organization_id.to_string(),
            testsuite_id: testsuite.testsuite_id.clone(),
            testsuite_title: testsuite.title.clone(),
            environment,
            status,
            testcase_results: results,
            actor: actor.to_string(),
            started_at,
            finished_at,
        };

        self.audits.append_testsuite(&audit).await?;
        self.definitions
            .update_testsuite_last_run(
                organization_id,
                testsuite_id,
                LastRun {
                    status,
                    run_id,
                    at: finished_at,
                    by: actor.to_string(),
                },
            )
            .await?;

        Ok(audit)
    }
}

/// Aggregation law shared by both composite executors: FAILED if any child
/// failed, PASSED otherwise. The empty sequence passes.
fn overall_status<I: IntoIterator<Item = ExecutionStatus>>(children: I) -> ExecutionStatus {
    if children.into_iter().any(|status| status.is_failed()) {
        ExecutionStatus::Failed
    } else {
        ExecutionStatus::Passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Testcase, Testsuite, Workitem};
    use crate::store::MemoryStore;
    use testdeck_adapters::{
        LogKind, MemoryDocumentStore, MongoConfig, MongoOperation, SqlConfig, SqlStatementKind,
        WorkitemKind,
    };

    const ORG: &str = "ORG-00001";
    const ACTOR: &str = "USR-00001";

    fn sql_workitem(id: &str) -> Workitem {
        Workitem::new(id, ORG, format!("sql {}", id), WorkitemKind::Sql).with_sql_config(SqlConfig {
            query: "SELECT 1".to_string(),
            statement: SqlStatementKind::Select,
            database: "default".to_string(),
        })
    }

    /// A workitem that always fails: its document query is not valid JSON.
    fn broken_mongo_workitem(id: &str) -> Workitem {
        Workitem::new(id, ORG, format!("mongo {}", id), WorkitemKind::Mongo).with_mongo_config(
            MongoConfig {
                collection: "orders".to_string(),
                operation: MongoOperation::Find,
                query: "not json".to_string(),
                document: None,
                database: "default".to_string(),
            },
        )
    }

    fn runner(store: &Arc<MemoryStore>) -> Runner {
        runner_with_documents(store, Arc::new(MemoryDocumentStore::new()))
    }

    fn runner_with_documents(store: &Arc<MemoryStore>, documents: Arc<MemoryDocumentStore>) -> Runner {
        Runner::new(store.clone(), store.clone(), store.clone(), documents)
    }

    #[test]
    fn test_overall_status_law() {
        use ExecutionStatus::*;
        assert_eq!(overall_status([]), Passed);
        assert_eq!(overall_status([Passed, Passed]), Passed);
        assert_eq!(overall_status([Passed, Failed, Passed]), Failed);
        assert_eq!(overall_status([Failed]), Failed);
    }

    #[tokio::test]
    async fn test_run_workitem_passes_and_audits() {
        let store = Arc::new(MemoryStore::new());
        store.put_workitem(sql_workitem("WI-00001")).await;

        let runner = runner(&store);
        let audit = runner
            .run_workitem(ORG, "WI-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.run_id, "RWI-00001");
        assert_eq!(audit.status, ExecutionStatus::Passed);
        assert_eq!(audit.environment, Environment::Qa);
        assert_eq!(audit.actor, ACTOR);
        assert!(audit.response.is_some());
        assert_eq!(audit.config_snapshot["snapshot_version"], 1);
        assert!(audit.finished_at >= audit.started_at);

        // Exactly one audit persisted.
        let audits = store.workitem_audits().await;
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].run_id, "RWI-00001");

        // Last-run summary overwritten on the definition.
        let workitem = store.workitem(ORG, "WI-00001").await.unwrap().unwrap();
        let last_run = workitem.last_run.unwrap();
        assert_eq!(last_run.run_id, "RWI-00001");
        assert_eq!(last_run.status, ExecutionStatus::Passed);
        assert_eq!(last_run.by, ACTOR);
    }

    #[tokio::test]
    async fn test_run_workitem_not_found_writes_no_audit() {
        let store = Arc::new(MemoryStore::new());
        let runner = runner(&store);

        let err = runner
            .run_workitem(ORG, "WI-99999", Environment::Qa, ACTOR)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::NotFound { kind: "workitem", .. }));
        assert!(store.workitem_audits().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_workitem_soft_deleted_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let mut workitem = sql_workitem("WI-00001");
        workitem.is_deleted = true;
        store.put_workitem(workitem).await;

        let runner = runner(&store);
        let err = runner
            .run_workitem(ORG, "WI-00001", Environment::Qa, ACTOR)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::NotFound { .. }));
        assert!(store.workitem_audits().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_workitem_missing_config_fails_but_audits() {
        let store = Arc::new(MemoryStore::new());
        // REST tag without a REST config.
        store
            .put_workitem(Workitem::new("WI-00001", ORG, "orphan", WorkitemKind::Rest))
            .await;

        let runner = runner(&store);
        let audit = runner
            .run_workitem(ORG, "WI-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.status, ExecutionStatus::Failed);
        assert!(audit.response.is_none());
        assert_eq!(audit.logs.last().unwrap().kind, LogKind::Error);
        assert_eq!(store.workitem_audits().await.len(), 1);

        let workitem = store.workitem(ORG, "WI-00001").await.unwrap().unwrap();
        assert_eq!(workitem.last_run.unwrap().status, ExecutionStatus::Failed);
    }

    #[tokio::test]
    async fn test_run_workitem_adapter_failure_is_absorbed() {
        let store = Arc::new(MemoryStore::new());
        store.put_workitem(broken_mongo_workitem("WI-00001")).await;

        let runner = runner(&store);
        let audit = runner
            .run_workitem(ORG, "WI-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.status, ExecutionStatus::Failed);
        assert!(audit.logs.iter().any(|l| l.kind == LogKind::Error));
        assert_eq!(store.workitem_audits().await.len(), 1);
    }

    #[tokio::test]
    async fn test_run_workitem_mongo_find_captures_documents() {
        let store = Arc::new(MemoryStore::new());
        let documents = Arc::new(MemoryDocumentStore::new());
        documents
            .seed("orders", vec![serde_json::json!({"status": "open"})])
            .await;

        let mut workitem = broken_mongo_workitem("WI-00001");
        if let Some(config) = workitem.mongo_config.as_mut() {
            config.query = "{\"status\": \"open\"}".to_string();
        }
        store.put_workitem(workitem).await;

        let runner = runner_with_documents(&store, documents);
        let audit = runner
            .run_workitem(ORG, "WI-00001", Environment::Prod, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.status, ExecutionStatus::Passed);
        let response = audit.response.unwrap();
        assert_eq!(response["documents"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_testcase_keeps_order_and_runs_all_children() {
        let store = Arc::new(MemoryStore::new());
        store.put_workitem(sql_workitem("WI-00001")).await;
        store.put_workitem(broken_mongo_workitem("WI-00002")).await;
        store.put_workitem(sql_workitem("WI-00003")).await;
        store
            .put_testcase(Testcase::new("TC-00001", ORG, "smoke").with_workitems(vec![
                "WI-00001".to_string(),
                "WI-00002".to_string(),
                "WI-00003".to_string(),
            ]))
            .await;

        let runner = runner(&store);
        let audit = runner
            .run_testcase(ORG, "TC-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.run_id, "RTC-00001");
        assert_eq!(audit.status, ExecutionStatus::Failed);

        // All three children ran, in input order, despite the failure in
        // the middle.
        assert_eq!(audit.workitem_results.len(), 3);
        assert_eq!(audit.workitem_results[0].workitem_id, "WI-00001");
        assert_eq!(audit.workitem_results[0].status, ExecutionStatus::Passed);
        assert_eq!(audit.workitem_results[1].workitem_id, "WI-00002");
        assert_eq!(audit.workitem_results[1].status, ExecutionStatus::Failed);
        assert!(audit.workitem_results[1].logs.iter().any(|l| l.kind == LogKind::Error));
        assert_eq!(audit.workitem_results[2].status, ExecutionStatus::Passed);

        // Each child run was also individually audited.
        assert_eq!(store.workitem_audits().await.len(), 3);
        assert_eq!(store.testcase_audits().await.len(), 1);

        let testcase = store.testcase(ORG, "TC-00001").await.unwrap().unwrap();
        let last_run = testcase.last_run.unwrap();
        assert_eq!(last_run.run_id, "RTC-00001");
        assert_eq!(last_run.status, ExecutionStatus::Failed);
    }

    #[tokio::test]
    async fn test_run_testcase_empty_passes() {
        let store = Arc::new(MemoryStore::new());
        store.put_testcase(Testcase::new("TC-00001", ORG, "empty")).await;

        let runner = runner(&store);
        let audit = runner
            .run_testcase(ORG, "TC-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.status, ExecutionStatus::Passed);
        assert!(audit.workitem_results.is_empty());
    }

    #[tokio::test]
    async fn test_run_testcase_duplicate_workitem_ids() {
        let store = Arc::new(MemoryStore::new());
        store.put_workitem(sql_workitem("WI-00001")).await;
        store
            .put_testcase(
                Testcase::new("TC-00001", ORG, "twice")
                    .with_workitems(vec!["WI-00001".to_string(), "WI-00001".to_string()]),
            )
            .await;

        let runner = runner(&store);
        let audit = runner
            .run_testcase(ORG, "TC-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.workitem_results.len(), 2);
        // One workitem audit per run, not per definition.
        assert_eq!(store.workitem_audits().await.len(), 2);
    }

    #[tokio::test]
    async fn test_run_testcase_dangling_workitem_propagates_not_found() {
        let store = Arc::new(MemoryStore::new());
        store
            .put_testcase(
                Testcase::new("TC-00001", ORG, "dangling")
                    .with_workitems(vec!["WI-99999".to_string()]),
            )
            .await;

        let runner = runner(&store);
        let err = runner
            .run_testcase(ORG, "TC-00001", Environment::Qa, ACTOR)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::NotFound { kind: "workitem", .. }));
        assert!(store.testcase_audits().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_testsuite_aggregates_over_testcases() {
        let store = Arc::new(MemoryStore::new());
        store.put_workitem(sql_workitem("WI-00001")).await;
        store.put_workitem(broken_mongo_workitem("WI-00002")).await;
        store
            .put_testcase(
                Testcase::new("TC-00001", ORG, "passing")
                    .with_workitems(vec!["WI-00001".to_string()]),
            )
            .await;
        store
            .put_testcase(
                Testcase::new("TC-00002", ORG, "failing")
                    .with_workitems(vec!["WI-00002".to_string()]),
            )
            .await;
        store
            .put_testsuite(
                Testsuite::new("TS-00001", ORG, "nightly")
                    .with_testcases(vec!["TC-00001".to_string(), "TC-00002".to_string()]),
            )
            .await;

        let runner = runner(&store);
        let audit = runner
            .run_testsuite(ORG, "TS-00001", Environment::Preprod, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.run_id, "RTS-00001");
        assert_eq!(audit.status, ExecutionStatus::Failed);
        assert_eq!(audit.testcase_results.len(), 2);
        assert_eq!(audit.testcase_results[0].testcase_id, "TC-00001");
        assert_eq!(audit.testcase_results[0].status, ExecutionStatus::Passed);
        assert_eq!(audit.testcase_results[1].status, ExecutionStatus::Failed);
        // Full child audits are embedded, down to workitem results.
        assert_eq!(audit.testcase_results[1].workitem_results.len(), 1);

        // Every level persisted its own audit.
        assert_eq!(store.workitem_audits().await.len(), 2);
        assert_eq!(store.testcase_audits().await.len(), 2);
        assert_eq!(store.testsuite_audits().await.len(), 1);

        let testsuite = store.testsuite(ORG, "TS-00001").await.unwrap().unwrap();
        assert_eq!(testsuite.last_run.unwrap().status, ExecutionStatus::Failed);
    }

    #[tokio::test]
    async fn test_run_testsuite_empty_passes() {
        let store = Arc::new(MemoryStore::new());
        store.put_testsuite(Testsuite::new("TS-00001", ORG, "empty")).await;

        let runner = runner(&store);
        let audit = runner
            .run_testsuite(ORG, "TS-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(audit.status, ExecutionStatus::Passed);
        assert!(audit.testcase_results.is_empty());
    }

    #[tokio::test]
    async fn test_run_testsuite_not_found() {
        let store = Arc::new(MemoryStore::new());
        let runner = runner(&store);

        let err = runner
            .run_testsuite(ORG, "TS-99999", Environment::Qa, ACTOR)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::NotFound { kind: "testsuite", .. }));
        assert!(store.testsuite_audits().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_ids_are_sequential_per_kind() {
        let store = Arc::new(MemoryStore::new());
        store.put_workitem(sql_workitem("WI-00001")).await;

        let runner = runner(&store);
        let first = runner
            .run_workitem(ORG, "WI-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();
        let second = runner
            .run_workitem(ORG, "WI-00001", Environment::Qa, ACTOR)
            .await
            .unwrap();

        assert_eq!(first.run_id, "RWI-00001");
        assert_eq!(second.run_id, "RWI-00002");

        // The definition's last-run pointer tracks the most recent run.
        let workitem = store.workitem(ORG, "WI-00001").await.unwrap().unwrap();
        assert_eq!(workitem.last_run.unwrap().run_id, "RWI-00002");
    }
}
