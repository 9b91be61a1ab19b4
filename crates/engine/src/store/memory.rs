//! In-memory store implementing every engine storage seam.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::model::{LastRun, RunTestcaseAudit, RunTestsuiteAudit, RunWorkitemAudit, Testcase, Testsuite, Workitem};
use crate::store::{AuditStore, CounterStore, DefinitionStore, StoreError};

#[derive(Default)]
struct Inner {
    workitems: HashMap<(String, String), Workitem>,
    testcases: HashMap<(String, String), Testcase>,
    testsuites: HashMap<(String, String), Testsuite>,
    counters: HashMap<String, i64>,
    workitem_audits: Vec<RunWorkitemAudit>,
    testcase_audits: Vec<RunTestcaseAudit>,
    testsuite_audits: Vec<RunTestsuiteAudit>,
}

/// Mutex-guarded in-memory store.
///
/// Serves as the test double for every storage seam and as a local
/// backend for demos. Keys are (organization id, entity id) pairs so
/// tenant isolation is exercised even in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a workitem definition.
    pub async fn put_workitem(&self, workitem: Workitem) {
        let mut inner = self.inner.lock().await;
        let key = (workitem.organization_id.clone(), workitem.workitem_id.clone());
        inner.workitems.insert(key, workitem);
    }

    /// Seed a testcase definition.
    pub async fn put_testcase(&self, testcase: Testcase) {
        let mut inner = self.inner.lock().await;
        let key = (testcase.organization_id.clone(), testcase.testcase_id.clone());
        inner.testcases.insert(key, testcase);
    }

    /// Seed a testsuite definition.
    pub async fn put_testsuite(&self, testsuite: Testsuite) {
        let mut inner = self.inner.lock().await;
        let key = (testsuite.organization_id.clone(), testsuite.testsuite_id.clone());
        inner.testsuites.insert(key, testsuite);
    }

    /// All persisted workitem audits, in append order.
    pub async fn workitem_audits(&self) -> Vec<RunWorkitemAudit> {
        self.inner.lock().await.workitem_audits.clone()
    }

    /// All persisted testcase audits, in append order.
    pub async fn testcase_audits(&self) -> Vec<RunTestcaseAudit> {
        self.inner.lock().await.testcase_audits.clone()
    }

    /// All persisted testsuite audits, in append order.
    pub async fn testsuite_audits(&self) -> Vec<RunTestsuiteAudit> {
        self.inner.lock().await.testsuite_audits.clone()
    }
}

#[async_trait]
impl DefinitionStore for MemoryStore {
    async fn workitem(&self, organization_id: &str, workitem_id: &str) -> Result<Option<Workitem>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .workitems
            .get(&(organization_id.to_string(), workitem_id.to_string()))
            .filter(|w| !w.is_deleted)
            .cloned())
    }

    async fn testcase(&self, organization_id: &str, testcase_id: &str) -> Result<Option<Testcase>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .testcases
            .get(&(organization_id.to_string(), testcase_id.to_string()))
            .filter(|t| !t.is_deleted)
            .cloned())
    }

    async fn testsuite(&self, organization_id: &str, testsuite_id: &str) -> Result<Option<Testsuite>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .testsuites
            .get(&(organization_id.to_string(), testsuite_id.to_string()))
            .filter(|t| !t.is_deleted)
            .cloned())
    }

    async fn update_workitem_last_run(
        &self,
        organization_id: &str,
        workitem_id: &str,
        last_run: LastRun,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(workitem) = inner
            .workitems
            .get_mut(&(organization_id.to_string(), workitem_id.to_string()))
        {
            workitem.last_run = Some(last_run);
        }
        Ok(())
    }

    async fn update_testcase_last_run(
        &self,
        organization_id: &str,
        testcase_id: &str,
        last_run: LastRun,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(testcase) = inner
            .testcases
            .get_mut(&(organization_id.to_string(), testcase_id.to_string()))
        {
            testcase.last_run = Some(last_run);
        }
        Ok(())
    }

    async fn update_testsuite_last_run(
        &self,
        organization_id: &str,
        testsuite_id: &str,
        last_run: LastRun,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(testsuite) = inner
            .testsuites
            .get_mut(&(organization_id.to_string(), testsuite_id.to_string()))
        {
            testsuite.last_run = Some(last_run);
        }
        Ok(())
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn append_workitem(&self, audit: &RunWorkitemAudit) -> Result<(), StoreError> {
        self.inner.lock().await.workitem_audits.push(audit.clone());
        Ok(())
    }

    async fn append_testcase(&self, audit: &RunTestcaseAudit) -> Result<(), StoreError> {
        self.inner.lock().await.testcase_audits.push(audit.clone());
        Ok(())
    }

    async fn append_testsuite(&self, audit: &RunTestsuiteAudit) -> Result<(), StoreError> {
        self.inner.lock().await.testsuite_audits.push(audit.clone());
        Ok(())
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment_and_get(&self, name: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().await;
        let value = inner.counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testdeck_adapters::WorkitemKind;

    #[tokio::test]
    async fn test_soft_deleted_definitions_are_excluded() {
        let store = MemoryStore::new();
        let mut workitem = Workitem::new("WI-00001", "ORG-00001", "ping", WorkitemKind::Sql);
        workitem.is_deleted = true;
        store.put_workitem(workitem).await;

        let found = store.workitem("ORG-00001", "WI-00001").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_tenant_scoped() {
        let store = MemoryStore::new();
        store
            .put_workitem(Workitem::new("WI-00001", "ORG-00001", "ping", WorkitemKind::Sql))
            .await;

        assert!(store.workitem("ORG-00001", "WI-00001").await.unwrap().is_some());
        assert!(store.workitem("ORG-00002", "WI-00001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counter_upsert_on_first_use() {
        let store = MemoryStore::new();
        assert_eq!(store.increment_and_get("run_workitem").await.unwrap(), 1);
        assert_eq!(store.increment_and_get("run_workitem").await.unwrap(), 2);
        assert_eq!(store.increment_and_get("run_testcase").await.unwrap(), 1);
    }
}
