// Suite runner
#![allow(dead_code)]

use crate::node::Node;
use crate::suite::assert::CaseContext;
use crate::suite::config::RunConfig;
use crate::suite::error::CaseSignal;
use crate::suite::types::{CaseMetadata, CaseResult, CaseRun, CaseState, SuiteMetadata};
use crate::tool::ToolError;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A check against one node
#[async_trait]
pub trait TestCase: Send + Sync {
    fn metadata(&self) -> CaseMetadata;

    async fn run(&self, node: &Node, ctx: &mut CaseContext) -> Result<(), CaseSignal>;
}

/// Cases grouped under one suite description
pub struct TestSuite {
    pub metadata: SuiteMetadata,
    pub cases: Vec<Arc<dyn TestCase>>,
}

impl TestSuite {
    pub fn new(metadata: SuiteMetadata) -> Self {
        Self {
            metadata,
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, case: impl TestCase + 'static) -> Self {
        self.cases.push(Arc::new(case));
        self
    }
}

/// Runs suites against nodes: serially on one node, concurrently across nodes
pub struct SuiteRunner {
    suites: Vec<TestSuite>,
    config: RunConfig,
}

impl SuiteRunner {
    pub fn new(suites: Vec<TestSuite>, config: RunConfig) -> Self {
        Self { suites, config }
    }

    /// Selected cases, ordered by priority (stable within equal priority)
    fn selected(&self) -> Vec<(&SuiteMetadata, CaseMetadata, &Arc<dyn TestCase>)> {
        let mut selected: Vec<_> = self
            .suites
            .iter()
            .flat_map(|suite| {
                suite
                    .cases
                    .iter()
                    .map(move |case| (&suite.metadata, case.metadata(), case))
            })
            .filter(|(suite, meta, _)| {
                self.config
                    .selects(&suite.name, &meta.name, meta.priority)
            })
            .collect();
        selected.sort_by_key(|(_, meta, _)| meta.priority);
        selected
    }

    pub fn case_count(&self) -> usize {
        self.selected().len()
    }

    /// `(suite, case)` names of the selected cases, in run order
    pub fn case_names(&self) -> Vec<(String, String)> {
        self.selected()
            .into_iter()
            .map(|(suite, meta, _)| (suite.name.clone(), meta.name))
            .collect()
    }

    /// Run every selected case on one node, one at a time
    pub async fn run_node(&self, node: &Node) -> Vec<CaseResult> {
        let mut results = Vec::new();
        for (suite, meta, case) in self.selected() {
            results.push(run_case(suite, &meta, case.as_ref(), node).await);
        }
        results
    }

    /// Run on many nodes at once
    pub async fn run_nodes(&self, nodes: &[Node]) -> Vec<CaseResult> {
        join_all(nodes.iter().map(|node| self.run_node(node)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Execute one case and classify how it ended
pub async fn run_case(
    suite: &SuiteMetadata,
    meta: &CaseMetadata,
    case: &dyn TestCase,
    node: &Node,
) -> CaseResult {
    let mut run = CaseRun::new();
    let mut ctx = CaseContext::new();

    if let Err(e) = run.start() {
        error!(error = %e, "case could not start");
    }
    info!(suite = %suite.name, case = %meta.name, node = %node.name(), "case started");

    let outcome = AssertUnwindSafe(case.run(node, &mut ctx))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            Err(CaseSignal::Unexpected(format!(
                "case panicked: {}",
                panic_message(payload.as_ref())
            )))
        });
    let assertions = ctx.into_assertions();
    let any_failed = assertions.iter().any(|a| !a.passed);
    let (state, message) = classify(outcome, any_failed, !assertions.is_empty());

    if let Err(e) = run.finish(state) {
        error!(error = %e, "case could not finish");
    }

    match state {
        CaseState::Passed | CaseState::Skipped => info!(
            suite = %suite.name,
            case = %meta.name,
            node = %node.name(),
            state = %state,
            detail = message.as_deref().unwrap_or_default(),
            "case finished"
        ),
        _ => warn!(
            suite = %suite.name,
            case = %meta.name,
            node = %node.name(),
            state = %state,
            detail = message.as_deref().unwrap_or_default(),
            "case finished"
        ),
    }

    CaseResult {
        suite: suite.name.clone(),
        case: meta.name.clone(),
        node: node.name().to_string(),
        state,
        message,
        assertions,
        started_at: run.started_at(),
        finished_at: run.finished_at(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

/// Map a case body's result to a terminal state.
///
/// A skip only counts as `Skipped` when no assertion was recorded yet;
/// otherwise the recorded assertions decide and the skip just stops the body.
pub fn classify(
    outcome: Result<(), CaseSignal>,
    any_failed: bool,
    any_recorded: bool,
) -> (CaseState, Option<String>) {
    let recorded_state = if any_failed {
        CaseState::Failed
    } else {
        CaseState::Passed
    };

    match outcome {
        Ok(()) => (recorded_state, None),
        Err(CaseSignal::Skipped(reason)) if !any_recorded => (CaseState::Skipped, Some(reason)),
        Err(CaseSignal::Skipped(reason)) => (
            recorded_state,
            Some(format!("stopped after assertions: {}", reason)),
        ),
        Err(e @ CaseSignal::AssertionFailed { .. }) => (CaseState::Failed, Some(e.to_string())),
        Err(CaseSignal::Tool(e @ (ToolError::Execution(_) | ToolError::NotSupported { .. }))) => {
            (CaseState::Failed, Some(e.to_string()))
        }
        Err(e @ (CaseSignal::Tool(_) | CaseSignal::Unexpected(_))) => {
            (CaseState::Errored, Some(e.to_string()))
        }
    }
}
