// Command runner seam and the per-node shell
#![allow(dead_code)]

use crate::executor::error::{ExecutionFailure, Result, RunnerError};
use crate::executor::types::{CommandInvocation, ExecutionOutcome};
use crate::executor::validate::validate;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Transport that executes a command line on a target and captures its output.
///
/// Timeouts and cancellation belong to the implementation and are reported
/// as [`RunnerError::Timeout`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command_line: &str) -> std::result::Result<ExecutionOutcome, RunnerError>;

    /// Short transport name for logs
    fn kind(&self) -> &str {
        "remote"
    }
}

/// The node's command session.
///
/// Holds one in-flight command at a time and caches outcomes of invocations
/// that do not ask for `force_run`.
pub struct Shell {
    runner: Arc<dyn CommandRunner>,
    lock: Mutex<()>,
    cache: Mutex<HashMap<String, ExecutionOutcome>>,
}

impl Shell {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            lock: Mutex::new(()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Execute an invocation and validate its exit code.
    ///
    /// Cached outcomes are validated against the current invocation's
    /// expectation, so a lenient earlier run never satisfies a stricter one.
    pub async fn run(&self, invocation: &CommandInvocation) -> Result<ExecutionOutcome> {
        let command_line = invocation.command_line();
        let _guard = self.lock.lock().await;

        let cached = if invocation.force_run() {
            None
        } else {
            self.cache.lock().await.get(&command_line).cloned()
        };
        if let Some(cached) = cached {
            debug!(command = %command_line, "using cached outcome");
            return validate(
                &command_line,
                cached,
                invocation.expected_exit(),
                &invocation.failure_message(),
            );
        }

        let start = Instant::now();
        let outcome = self
            .runner
            .run(&command_line)
            .await
            .map_err(|e| ExecutionFailure::from_runner(command_line.clone(), e))?;

        info!(
            command = %command_line.chars().take(100).collect::<String>(),
            transport = self.runner.kind(),
            duration_ms = start.elapsed().as_millis() as u64,
            exit_code = ?outcome.exit_code,
            stdout_bytes = outcome.stdout.len(),
            "command executed"
        );

        let outcome = validate(
            &command_line,
            outcome,
            invocation.expected_exit(),
            &invocation.failure_message(),
        )?;

        self.cache
            .lock()
            .await
            .insert(command_line, outcome.clone());

        Ok(outcome)
    }

    /// Drop every cached outcome
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.lock().await;
        debug!(entries = cache.len(), "clearing outcome cache");
        cache.clear();
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
