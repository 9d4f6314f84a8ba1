// Error types for Tool module

use crate::executor::ExecutionFailure;
use crate::os::{OsError, OsFamily};
use crate::tool::traits::Binding;
use thiserror::Error;

/// Tool errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{tool}' is not supported on {family}")]
    NotSupported { tool: String, family: OsFamily },

    #[error(transparent)]
    Execution(#[from] ExecutionFailure),

    #[error("Operation '{operation}' of tool '{tool}' is not implemented for {binding}")]
    OperationNotImplemented {
        tool: String,
        operation: &'static str,
        binding: Binding,
    },
}

impl From<OsError> for ToolError {
    fn from(err: OsError) -> Self {
        match err {
            OsError::Detection(failure) => ToolError::Execution(failure),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
