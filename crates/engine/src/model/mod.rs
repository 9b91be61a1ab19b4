//! Domain models.

pub mod audit;
pub mod common;
pub mod testcase;
pub mod testsuite;
pub mod workitem;

pub use audit::{RunTestcaseAudit, RunTestsuiteAudit, RunWorkitemAudit, WorkitemRunResult};
pub use common::{Environment, LastRun};
pub use testcase::Testcase;
pub use testsuite::Testsuite;
pub use workitem::Workitem;
