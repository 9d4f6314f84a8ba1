// Execution outcome validation

use crate::executor::error::ExecutionFailure;
use crate::executor::types::{ExecutionOutcome, ExpectedExit};
use tracing::debug;

/// Check an outcome's exit code against the expected set.
///
/// Matching outcomes are returned unchanged. Never retries.
pub fn validate(
    command: &str,
    outcome: ExecutionOutcome,
    expected: &ExpectedExit,
    failure_message: &str,
) -> Result<ExecutionOutcome, ExecutionFailure> {
    if expected.contains(outcome.exit_code) {
        return Ok(outcome);
    }

    debug!(
        command = %command,
        exit_code = ?outcome.exit_code,
        expected = %expected,
        "exit code mismatch"
    );

    Err(ExecutionFailure::UnexpectedExit {
        command: command.to_string(),
        message: failure_message.to_string(),
        exit_code: outcome.exit_code,
        stdout: outcome.stdout,
        stderr: outcome.stderr,
    })
}
