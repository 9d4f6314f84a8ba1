// Data types for Executor module
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exit codes an invocation is allowed to finish with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedExit {
    /// Any exit code is accepted
    #[default]
    Any,
    /// Exactly this exit code
    Code(i32),
    /// One of these exit codes
    OneOf(Vec<i32>),
}

impl ExpectedExit {
    /// Whether an exit code satisfies this expectation.
    /// A missing exit code (process killed by a signal) only satisfies `Any`.
    pub fn contains(&self, exit_code: Option<i32>) -> bool {
        match (self, exit_code) {
            (ExpectedExit::Any, _) => true,
            (_, None) => false,
            (ExpectedExit::Code(expected), Some(code)) => *expected == code,
            (ExpectedExit::OneOf(codes), Some(code)) => codes.contains(&code),
        }
    }
}

impl From<i32> for ExpectedExit {
    fn from(code: i32) -> Self {
        ExpectedExit::Code(code)
    }
}

impl From<Vec<i32>> for ExpectedExit {
    fn from(codes: Vec<i32>) -> Self {
        ExpectedExit::OneOf(codes)
    }
}

impl fmt::Display for ExpectedExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedExit::Any => write!(f, "any"),
            ExpectedExit::Code(code) => write!(f, "{}", code),
            ExpectedExit::OneOf(codes) => {
                let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
                write!(f, "one of [{}]", codes.join(", "))
            }
        }
    }
}

/// A single command to run on a node. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    command: String,
    args: Vec<String>,
    force_run: bool,
    expected_exit: ExpectedExit,
    failure_message: Option<String>,
}

impl CommandInvocation {
    /// Start building an invocation of `command`
    pub fn builder(command: impl Into<String>) -> CommandInvocationBuilder {
        CommandInvocationBuilder {
            inner: CommandInvocation {
                command: command.into(),
                args: Vec::new(),
                force_run: false,
                expected_exit: ExpectedExit::Any,
                failure_message: None,
            },
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn force_run(&self) -> bool {
        self.force_run
    }

    pub fn expected_exit(&self) -> &ExpectedExit {
        &self.expected_exit
    }

    /// Message used when the exit code does not match
    pub fn failure_message(&self) -> String {
        self.failure_message
            .clone()
            .unwrap_or_else(|| format!("'{}' exited with an unexpected code", self.command))
    }

    /// Render as a single shell command line
    pub fn command_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote(arg));
        }
        line
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Builder for [`CommandInvocation`]
#[derive(Debug, Clone)]
pub struct CommandInvocationBuilder {
    inner: CommandInvocation,
}

impl CommandInvocationBuilder {
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.inner.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Skip any cached outcome and always execute
    pub fn force_run(mut self, force_run: bool) -> Self {
        self.inner.force_run = force_run;
        self
    }

    pub fn expect_exit(mut self, expected: impl Into<ExpectedExit>) -> Self {
        self.inner.expected_exit = expected.into();
        self
    }

    pub fn failure_message(mut self, message: impl Into<String>) -> Self {
        self.inner.failure_message = Some(message.into());
        self
    }

    pub fn build(self) -> CommandInvocation {
        self.inner
    }
}

/// Single-quote an argument when the shell would otherwise split or expand it
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@%+".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Captured result of running a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    /// None when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ExecutionOutcome {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }

    /// Convenience for a successful run that only wrote to stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self::new(stdout, "", 0)
    }
}

/// Constraints for a single execution
#[derive(Debug, Clone)]
pub struct ExecutionConstraints {
    /// Maximum execution time in seconds
    pub timeout_secs: u64,
    /// Maximum size in bytes kept per captured stream
    pub max_output_bytes: usize,
    /// Working directory for execution
    pub working_dir: Option<std::path::PathBuf>,
}

impl Default for ExecutionConstraints {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_output_bytes: 1048576, // 1MB
            working_dir: None,
        }
    }
}
