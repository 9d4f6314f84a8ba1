// Error types for Executor module
#![allow(dead_code)]

use thiserror::Error;

/// Errors reported by a [`CommandRunner`](super::CommandRunner) before an
/// outcome is available
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to spawn '{0}': {1}")]
    SpawnFailed(String, String),

    #[error("Execution of '{0}' timed out after {1} seconds")]
    Timeout(String, u64),
}

/// A command that did not finish the way its invocation expected
#[derive(Debug, Clone, Error)]
pub enum ExecutionFailure {
    #[error("{message} (command: '{command}', exit code: {}, stderr: '{}')", display_code(.exit_code), .stderr.trim())]
    UnexpectedExit {
        command: String,
        message: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("'{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("'{command}' could not be run: {reason}")]
    Runner { command: String, reason: String },
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl ExecutionFailure {
    /// Classify a runner error for the command that produced it
    pub fn from_runner(command: impl Into<String>, err: RunnerError) -> Self {
        let command = command.into();
        match err {
            RunnerError::Timeout(_, timeout_secs) => ExecutionFailure::Timeout {
                command,
                timeout_secs,
            },
            other => ExecutionFailure::Runner {
                command,
                reason: other.to_string(),
            },
        }
    }

    pub fn command(&self) -> &str {
        match self {
            ExecutionFailure::UnexpectedExit { command, .. }
            | ExecutionFailure::Timeout { command, .. }
            | ExecutionFailure::Runner { command, .. } => command,
        }
    }

    /// Actual exit code, if the command got far enough to have one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionFailure::UnexpectedExit { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecutionFailure::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExecutionFailure>;
