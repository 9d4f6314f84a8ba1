// Local shell runner
#![allow(dead_code)]

use crate::executor::config::ExecutorConfig;
use crate::executor::error::RunnerError;
use crate::executor::runner::CommandRunner;
use crate::executor::types::{ExecutionConstraints, ExecutionOutcome};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Runs command lines on this machine through `<shell> -c`
pub struct LocalRunner {
    shell: String,
    constraints: ExecutionConstraints,
}

impl LocalRunner {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            constraints: config.constraints.clone(),
        }
    }
}

impl Default for LocalRunner {
    fn default() -> Self {
        Self::new(&ExecutorConfig::default())
    }
}

#[async_trait]
impl CommandRunner for LocalRunner {
    async fn run(&self, command_line: &str) -> Result<ExecutionOutcome, RunnerError> {
        debug!(command = %command_line, shell = %self.shell, "spawning local command");

        let mut command = Command::new(&self.shell);
        command.arg("-c").arg(command_line).kill_on_drop(true);
        if let Some(dir) = &self.constraints.working_dir {
            command.current_dir(dir);
        }

        let output = match timeout(
            Duration::from_secs(self.constraints.timeout_secs),
            command.output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(RunnerError::SpawnFailed(
                    command_line.to_string(),
                    e.to_string(),
                ));
            }
            Err(_) => {
                return Err(RunnerError::Timeout(
                    command_line.to_string(),
                    self.constraints.timeout_secs,
                ));
            }
        };

        let max = self.constraints.max_output_bytes;
        Ok(ExecutionOutcome {
            stdout: capture(&output.stdout, max),
            stderr: capture(&output.stderr, max),
            exit_code: output.status.code(),
        })
    }

    fn kind(&self) -> &str {
        "local"
    }
}

/// Decode a captured stream, keeping at most `max` bytes
fn capture(bytes: &[u8], max: usize) -> String {
    let kept = &bytes[..bytes.len().min(max)];
    String::from_utf8_lossy(kept).into_owned()
}
