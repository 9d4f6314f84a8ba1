// Shared helpers for integration tests
#![allow(dead_code)]

use crate::executor::{CommandRunner, ExecutionOutcome, RunnerError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .init();
    });
}

enum Reply {
    Outcome(ExecutionOutcome),
    Timeout(u64),
}

/// Runner answering from a fixed table of command lines
#[derive(Default)]
pub struct MockRunner {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, command_line: &str, outcome: ExecutionOutcome) -> Self {
        self.replies
            .insert(command_line.to_string(), Reply::Outcome(outcome));
        self
    }

    pub fn timeout(mut self, command_line: &str, secs: u64) -> Self {
        self.replies
            .insert(command_line.to_string(), Reply::Timeout(secs));
        self
    }

    /// A FreeBSD node
    pub fn freebsd() -> Self {
        Self::new()
            .reply("uname -s", ExecutionOutcome::success("FreeBSD\n"))
            .reply("uname -r", ExecutionOutcome::success("13.2-RELEASE\n"))
    }

    /// A Linux node with the given `/etc/os-release`
    pub fn linux(os_release: &str) -> Self {
        Self::new()
            .reply("uname -s", ExecutionOutcome::success("Linux\n"))
            .reply("cat /etc/os-release", ExecutionOutcome::success(os_release))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, command_line: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == command_line)
            .count()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command_line: &str) -> Result<ExecutionOutcome, RunnerError> {
        self.calls.lock().unwrap().push(command_line.to_string());
        match self.replies.get(command_line) {
            Some(Reply::Outcome(outcome)) => Ok(outcome.clone()),
            Some(Reply::Timeout(secs)) => Err(RunnerError::Timeout(command_line.to_string(), *secs)),
            None => Ok(ExecutionOutcome::new(
                "",
                format!("sh: {}: not found", command_line),
                127,
            )),
        }
    }

    fn kind(&self) -> &str {
        "mock"
    }
}

pub const UBUNTU_OS_RELEASE: &str = r#"NAME="Ubuntu"
VERSION_ID="22.04"
ID=ubuntu
ID_LIKE=debian
PRETTY_NAME="Ubuntu 22.04.3 LTS"
"#;

pub const CENTOS_7_7_OS_RELEASE: &str = r#"NAME="CentOS Linux"
ID="centos"
ID_LIKE="rhel fedora"
VERSION_ID="7.7.1908"
PRETTY_NAME="CentOS Linux 7 (Core)"
"#;

pub const CENTOS_8_OS_RELEASE: &str = r#"NAME="CentOS Linux"
ID="centos"
ID_LIKE="rhel fedora"
VERSION_ID="8"
PRETTY_NAME="CentOS Linux 8"
"#;
