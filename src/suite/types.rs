// Suite data types
#![allow(dead_code)]

use crate::suite::error::CaseStateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes a group of test cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteMetadata {
    pub name: String,
    pub area: String,
    pub category: String,
    pub description: String,
}

/// Describes one test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub name: String,
    pub description: String,
    /// Lower runs first and is more important
    pub priority: u8,
}

/// Lifecycle of a case execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseState {
    Pending,
    Running,
    Passed,
    Failed,
    Skipped,
    Errored,
}

impl CaseState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CaseState::Passed | CaseState::Failed | CaseState::Skipped | CaseState::Errored
        )
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseState::Pending => "PENDING",
            CaseState::Running => "RUNNING",
            CaseState::Passed => "PASSED",
            CaseState::Failed => "FAILED",
            CaseState::Skipped => "SKIPPED",
            CaseState::Errored => "ERRORED",
        };
        f.pad(s)
    }
}

/// State holder enforcing `Pending -> Running -> terminal`
#[derive(Debug)]
pub struct CaseRun {
    state: CaseState,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl CaseRun {
    pub fn new() -> Self {
        Self {
            state: CaseState::Pending,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn state(&self) -> CaseState {
        self.state
    }

    pub fn start(&mut self) -> Result<(), CaseStateError> {
        if self.state != CaseState::Pending {
            return Err(CaseStateError {
                from: self.state,
                to: CaseState::Running,
            });
        }
        self.state = CaseState::Running;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    pub fn finish(&mut self, state: CaseState) -> Result<(), CaseStateError> {
        if self.state != CaseState::Running || !state.is_terminal() {
            return Err(CaseStateError {
                from: self.state,
                to: state,
            });
        }
        self.state = state;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }
}

impl Default for CaseRun {
    fn default() -> Self {
        Self::new()
    }
}

/// One recorded assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionRecord {
    pub description: String,
    pub passed: bool,
    /// What was expected versus observed, when it failed
    pub detail: Option<String>,
}

/// Final record of one case on one node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub suite: String,
    pub case: String,
    pub node: String,
    pub state: CaseState,
    pub message: Option<String>,
    pub assertions: Vec<AssertionRecord>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Counts per terminal state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl RunSummary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.state {
                CaseState::Passed => summary.passed += 1,
                CaseState::Failed => summary.failed += 1,
                CaseState::Skipped => summary.skipped += 1,
                CaseState::Errored => summary.errored += 1,
                CaseState::Pending | CaseState::Running => {}
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errored
    }

    /// No failures and no errors; skips are fine
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases: {} passed, {} failed, {} skipped, {} errored",
            self.total(),
            self.passed,
            self.failed,
            self.skipped,
            self.errored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_run_transitions() {
        let mut run = CaseRun::new();
        assert_eq!(run.state(), CaseState::Pending);
        assert!(run.finish(CaseState::Passed).is_err());

        run.start().unwrap();
        assert!(run.start().is_err());
        assert!(run.finish(CaseState::Pending).is_err());

        run.finish(CaseState::Skipped).unwrap();
        assert_eq!(run.state(), CaseState::Skipped);
        assert!(run.finish(CaseState::Passed).is_err());
        assert!(run.started_at().unwrap() <= run.finished_at().unwrap());
    }
}
