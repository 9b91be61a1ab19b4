//! Storage seams consumed by the executors.
//!
//! All persistence is injected through these traits so the engine never
//! holds an implicit global database handle, and tests substitute the
//! in-memory [`MemoryStore`].

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{LastRun, RunTestcaseAudit, RunTestsuiteAudit, RunWorkitemAudit, Testcase, Testsuite, Workitem};

pub use memory::MemoryStore;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable or the operation failed.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Stored document could not be encoded/decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read access to active definitions plus last-run metadata updates.
///
/// Lookups exclude soft-deleted records; that exclusion rule lives here,
/// in one place, rather than being repeated across query sites.
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    async fn workitem(&self, organization_id: &str, workitem_id: &str) -> Result<Option<Workitem>, StoreError>;
    async fn testcase(&self, organization_id: &str, testcase_id: &str) -> Result<Option<Testcase>, StoreError>;
    async fn testsuite(&self, organization_id: &str, testsuite_id: &str) -> Result<Option<Testsuite>, StoreError>;

    /// Overwrite a workitem's last-run summary; last write wins.
    async fn update_workitem_last_run(
        &self,
        organization_id: &str,
        workitem_id: &str,
        last_run: LastRun,
    ) -> Result<(), StoreError>;

    /// Overwrite a testcase's last-run summary; last write wins.
    async fn update_testcase_last_run(
        &self,
        organization_id: &str,
        testcase_id: &str,
        last_run: LastRun,
    ) -> Result<(), StoreError>;

    /// Overwrite a testsuite's last-run summary; last write wins.
    async fn update_testsuite_last_run(
        &self,
        organization_id: &str,
        testsuite_id: &str,
        last_run: LastRun,
    ) -> Result<(), StoreError>;
}

/// Insert-only audit sink.
///
/// The trait exposes no update or delete operations, so audit immutability
/// is structural rather than a convention.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append_workitem(&self, audit: &RunWorkitemAudit) -> Result<(), StoreError>;
    async fn append_testcase(&self, audit: &RunTestcaseAudit) -> Result<(), StoreError>;
    async fn append_testsuite(&self, audit: &RunTestsuiteAudit) -> Result<(), StoreError>;
}

/// Atomic per-name counters backing the identifier allocator.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment the named counter and return its new value.
    ///
    /// Upsert-on-first-use: an unseen counter name starts at 0, so the
    /// first allocation returns 1.
    async fn increment_and_get(&self, name: &str) -> Result<i64, StoreError>;
}
