//! Identifier allocator.
//!
//! Issues unique, monotonically increasing, human-readable identifiers per
//! entity kind by delegating to the counter store's atomic
//! increment-and-get. There is no local fallback: if the counter store is
//! unreachable, allocation fails and the error propagates, since a locally
//! invented id could collide downstream.

use std::sync::Arc;

use crate::store::{CounterStore, StoreError};

/// Allocates `{PREFIX}-{counter:05}` identifiers.
#[derive(Clone)]
pub struct IdAllocator {
    counters: Arc<dyn CounterStore>,
}

impl IdAllocator {
    /// Create an allocator over the given counter store.
    pub fn new(counters: Arc<dyn CounterStore>) -> Self {
        Self { counters }
    }

    /// Allocate the next id for a counter name, e.g. `WI-00001`.
    pub async fn next_id(&self, counter: &str, prefix: &str) -> Result<String, StoreError> {
        let value = self.counters.increment_and_get(counter).await?;
        Ok(format!("{}-{:05}", prefix, value))
    }

    /// Next workitem definition id (`WI-`).
    pub async fn workitem_id(&self) -> Result<String, StoreError> {
        self.next_id("workitem", "WI").await
    }

    /// Next testcase definition id (`TC-`).
    pub async fn testcase_id(&self) -> Result<String, StoreError> {
        self.next_id("testcase", "TC").await
    }

    /// Next testsuite definition id (`TS-`).
    pub async fn testsuite_id(&self) -> Result<String, StoreError> {
        self.next_id("testsuite", "TS").await
    }

    /// Next workitem run id (`RWI-`).
    pub async fn run_workitem_id(&self) -> Result<String, StoreError> {
        self.next_id("run_workitem", "RWI").await
    }

    /// Next testcase run id (`RTC-`).
    pub async fn run_testcase_id(&self) -> Result<String, StoreError> {
        self.next_id("run_testcase", "RTC").await
    }

    /// Next testsuite run id (`RTS-`).
    pub async fn run_testsuite_id(&self) -> Result<String, StoreError> {
        self.next_id("run_testsuite", "RTS").await
    }
}
