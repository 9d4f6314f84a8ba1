// Suite module - test case metadata, outcomes and the runner
#![allow(unused_imports)]

pub mod assert;
pub mod config;
pub mod error;
pub mod runner;
pub mod types;

pub use assert::CaseContext;
pub use config::RunConfig;
pub use error::{CaseSignal, CaseStateError, ConfigError};
pub use runner::{SuiteRunner, TestCase, TestSuite, classify, run_case};
pub use types::{
    AssertionRecord, CaseMetadata, CaseResult, CaseRun, CaseState, RunSummary, SuiteMetadata,
};
