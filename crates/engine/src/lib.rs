//! Testdeck Execution Engine
//!
//! Runs stored workitem, testcase and testsuite definitions against their
//! protocol adapters and persists an immutable audit trail.
//!
//! This crate provides:
//! - Domain models: definitions, audits, environments
//! - Store seams (definitions, audits, counters) with an in-memory fake
//! - The identifier allocator for human-readable ids
//! - The three executors behind [`Runner`]

pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod runner;
pub mod store;

pub use config::EngineConfig;
pub use error::EngineError;
pub use ids::IdAllocator;
pub use model::{Environment, LastRun, RunTestcaseAudit, RunTestsuiteAudit, RunWorkitemAudit, Testcase, Testsuite, Workitem, WorkitemRunResult};
pub use runner::Runner;
pub use store::{AuditStore, CounterStore, DefinitionStore, MemoryStore, StoreError};
