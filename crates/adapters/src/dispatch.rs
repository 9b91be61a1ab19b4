//! Closed dispatch over the workitem type tag.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{MongoConfig, RestConfig, SqlConfig, WorkitemKind};
use crate::log::ExecutionLog;
use crate::mongo::MongoAdapter;
use crate::rest::RestAdapter;
use crate::result::AdapterOutcome;
use crate::sql::SqlAdapter;
use crate::store::DocumentStore;

/// A workitem's type tag paired with its matching configuration.
///
/// Modeled as a tagged union so adapter selection is an exhaustive,
/// compiler-checked `match` instead of an open registry lookup.
#[derive(Debug)]
pub enum AdapterSpec<'a> {
    Rest(&'a RestConfig),
    Sql(&'a SqlConfig),
    Mongo(&'a MongoConfig),
}

impl AdapterSpec<'_> {
    /// The type tag this spec dispatches to.
    pub fn kind(&self) -> WorkitemKind {
        match self {
            AdapterSpec::Rest(_) => WorkitemKind::Rest,
            AdapterSpec::Sql(_) => WorkitemKind::Sql,
            AdapterSpec::Mongo(_) => WorkitemKind::Mongo,
        }
    }
}

/// The full set of protocol adapters.
pub struct AdapterSet {
    rest: RestAdapter,
    sql: SqlAdapter,
    mongo: MongoAdapter,
}

impl AdapterSet {
    /// Create the adapter set with default settings (30s HTTP timeout,
    /// FIND bounded to 10 documents).
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            rest: RestAdapter::new(),
            sql: SqlAdapter::new(),
            mongo: MongoAdapter::new(documents),
        }
    }

    /// Create the adapter set with explicit settings.
    pub fn with_settings(
        documents: Arc<dyn DocumentStore>,
        http_timeout: Duration,
        find_limit: usize,
    ) -> Self {
        Self {
            rest: RestAdapter::with_timeout(http_timeout),
            sql: SqlAdapter::new(),
            mongo: MongoAdapter::with_find_limit(documents, find_limit),
        }
    }

    /// Dispatch to the adapter matching the spec's tag.
    ///
    /// Infallible by construction: every adapter absorbs its own failures
    /// into the outcome and the log trail.
    pub async fn execute(
        &self,
        spec: AdapterSpec<'_>,
        logs: &mut Vec<ExecutionLog>,
    ) -> AdapterOutcome {
        tracing::debug!(kind = %spec.kind(), "Dispatching adapter");

        match spec {
            AdapterSpec::Rest(config) => self.rest.execute(config, logs).await,
            AdapterSpec::Sql(config) => self.sql.execute(config, logs).await,
            AdapterSpec::Mongo(config) => self.mongo.execute(config, logs).await,
        }
    }
}
