//! Engine error types.
//!
//! Only `NotFound` crosses the executor boundary as a hard failure for a
//! run target; adapter-level failures degrade to FAILED, fully-audited
//! runs instead of surfacing here. Store errors also propagate: a run that
//! cannot be audited must not pretend to have run.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by the executors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Target definition missing or soft-deleted; nothing to execute and
    /// no audit is written.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A storage seam failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Shorthand for a missing definition.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        EngineError::NotFound { kind, id: id.into() }
    }
}
