// Executor module - command invocation, execution and exit code validation
#![allow(unused_imports)]

pub mod config;
pub mod error;
pub mod local;
pub mod runner;
pub mod types;
pub mod validate;

pub use config::ExecutorConfig;
pub use error::{ExecutionFailure, Result, RunnerError};
pub use local::LocalRunner;
pub use runner::{CommandRunner, Shell};
pub use types::{CommandInvocation, ExecutionConstraints, ExecutionOutcome, ExpectedExit};
pub use validate::validate;
