// Integration tests for Suite module and the built-in suites
// This file should be run with cargo test --test test_suite

#[path = "../src/executor/mod.rs"]
mod executor;

#[path = "../src/os/mod.rs"]
mod os;

#[path = "../src/tool/mod.rs"]
mod tool;

#[path = "../src/node/mod.rs"]
mod node;

#[path = "../src/suite/mod.rs"]
mod suite;

#[path = "../src/testsuites/mod.rs"]
mod testsuites;

mod common;

use async_trait::async_trait;
use common::{
    CENTOS_7_7_OS_RELEASE, CENTOS_8_OS_RELEASE, MockRunner, UBUNTU_OS_RELEASE, init_tracing,
};
use executor::ExecutionOutcome;
use node::Node;
use std::sync::Arc;
use suite::{
    CaseContext, CaseMetadata, CaseResult, CaseSignal, CaseState, RunConfig, RunSummary,
    SuiteMetadata, SuiteRunner, TestCase, TestSuite,
};
use tool::Registry;

const FLOPPY_DRY_RUN: &str = "modprobe -nv floppy";

fn floppy_not_loaded() -> ExecutionOutcome {
    ExecutionOutcome::success("insmod /lib/modules/5.15.0/kernel/drivers/block/floppy.ko\n")
}

fn node_with(name: &str, runner: MockRunner) -> (Arc<MockRunner>, Node) {
    let runner = Arc::new(runner);
    let node = Node::new(name, runner.clone(), Arc::new(Registry::builtin()));
    (runner, node)
}

fn only(case: &str) -> RunConfig {
    RunConfig {
        include: vec![case.to_string()],
        ..Default::default()
    }
}

fn find<'a>(results: &'a [CaseResult], case: &str) -> &'a CaseResult {
    results
        .iter()
        .find(|r| r.case == case)
        .expect("case result present")
}

#[cfg(test)]
mod floppy_tests {
    use super::*;

    #[tokio::test]
    async fn test_floppy_not_loaded_passes() {
        init_tracing();

        let (_, node) = node_with(
            "ubuntu",
            MockRunner::linux(UBUNTU_OS_RELEASE).reply(FLOPPY_DRY_RUN, floppy_not_loaded()),
        );
        let runner = SuiteRunner::new(testsuites::all(), only("check_floppy_module"));

        let results = runner.run_node(&node).await;
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.state, CaseState::Passed);
        assert_eq!(result.suite, "core");
        assert_eq!(result.assertions.len(), 1);
        assert!(result.assertions[0].passed);
        assert!(result.started_at.is_some() && result.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_floppy_loaded_fails() {
        let (_, node) = node_with(
            "ubuntu",
            MockRunner::linux(UBUNTU_OS_RELEASE)
                .reply(FLOPPY_DRY_RUN, ExecutionOutcome::success("")),
        );
        let runner = SuiteRunner::new(testsuites::all(), only("check_floppy_module"));

        let results = runner.run_node(&node).await;
        let result = find(&results, "check_floppy_module");
        assert_eq!(result.state, CaseState::Failed);
        assert!(result.message.as_deref().unwrap().contains("blacklist"));
        assert!(!result.assertions[0].passed);
    }

    /// Old CentOS is skipped before modprobe ever runs
    #[tokio::test]
    async fn test_old_centos_skipped() {
        let (runner, node) = node_with("centos7", MockRunner::linux(CENTOS_7_7_OS_RELEASE));
        let suites = SuiteRunner::new(testsuites::all(), only("check_floppy_module"));

        let results = suites.run_node(&node).await;
        let result = find(&results, "check_floppy_module");
        assert_eq!(result.state, CaseState::Skipped);
        assert!(result.assertions.is_empty());
        assert!(result.message.as_deref().unwrap().contains("7.7.1908"));
        assert_eq!(runner.call_count(FLOPPY_DRY_RUN), 0);
    }

    #[tokio::test]
    async fn test_newer_centos_runs() {
        let (runner, node) = node_with(
            "centos8",
            MockRunner::linux(CENTOS_8_OS_RELEASE).reply(FLOPPY_DRY_RUN, floppy_not_loaded()),
        );
        let suites = SuiteRunner::new(testsuites::all(), only("check_floppy_module"));

        let results = suites.run_node(&node).await;
        assert_eq!(find(&results, "check_floppy_module").state, CaseState::Passed);
        assert_eq!(runner.call_count(FLOPPY_DRY_RUN), 1);
    }

    /// Modprobe has no BSD variant: a definite failure, not an error
    #[tokio::test]
    async fn test_floppy_on_bsd_not_supported() {
        let (_, node) = node_with("bsd", MockRunner::freebsd());
        let suites = SuiteRunner::new(testsuites::all(), only("check_floppy_module"));

        let results = suites.run_node(&node).await;
        let result = find(&results, "check_floppy_module");
        assert_eq!(result.state, CaseState::Failed);
        assert!(result.message.as_deref().unwrap().contains("not supported"));
    }

    #[tokio::test]
    async fn test_modprobe_timeout_fails() {
        let (_, node) = node_with(
            "slow",
            MockRunner::linux(UBUNTU_OS_RELEASE).timeout(FLOPPY_DRY_RUN, 30),
        );
        let suites = SuiteRunner::new(testsuites::all(), only("check_floppy_module"));

        let results = suites.run_node(&node).await;
        let result = find(&results, "check_floppy_module");
        assert_eq!(result.state, CaseState::Failed);
        assert!(result.message.as_deref().unwrap().contains("timed out"));
    }
}

#[cfg(test)]
mod network_tests {
    use super::*;

    #[tokio::test]
    async fn test_bsd_loopback_present() {
        let (_, node) = node_with(
            "bsd",
            MockRunner::freebsd().reply("ifconfig -l", ExecutionOutcome::success("em0 lo0\n")),
        );
        let suites = SuiteRunner::new(testsuites::all(), only("network"));

        let results = suites.run_node(&node).await;
        let result = find(&results, "check_loopback_interface");
        assert_eq!(result.state, CaseState::Passed);
        assert_eq!(result.assertions.len(), 2);
    }

    #[tokio::test]
    async fn test_bsd_without_interfaces_fails_first_assertion() {
        let (_, node) = node_with(
            "bsd",
            MockRunner::freebsd().reply("ifconfig -l", ExecutionOutcome::success("")),
        );
        let suites = SuiteRunner::new(testsuites::all(), only("network"));

        let results = suites.run_node(&node).await;
        let result = find(&results, "check_loopback_interface");
        assert_eq!(result.state, CaseState::Failed);
        // the failed assertion stops the case
        assert_eq!(result.assertions.len(), 1);
    }

    /// Generic Linux cannot list interfaces with ifconfig, so the case skips
    #[tokio::test]
    async fn test_generic_linux_skips() {
        let (_, node) = node_with("linux", MockRunner::linux(UBUNTU_OS_RELEASE));
        let suites = SuiteRunner::new(testsuites::all(), only("network"));

        let results = suites.run_node(&node).await;
        let result = find(&results, "check_loopback_interface");
        assert_eq!(result.state, CaseState::Skipped);
        assert!(result.message.as_deref().unwrap().contains("default"));
    }
}

/// Case that asserts once and then asks to skip
struct AssertThenSkip {
    first: bool,
}

#[async_trait]
impl TestCase for AssertThenSkip {
    fn metadata(&self) -> CaseMetadata {
        CaseMetadata {
            name: "assert_then_skip".to_string(),
            description: "records an assertion, then skips".to_string(),
            priority: 3,
        }
    }

    async fn run(&self, _node: &Node, ctx: &mut CaseContext) -> Result<(), CaseSignal> {
        // a failed assertion would stop here, so record it without `?`
        let _ = ctx.assert_that(self.first, "first check").is_true();
        Err(ctx.skip("precondition found late"))
    }
}

/// Case that fails with an error nobody raised on purpose
struct Broken;

#[async_trait]
impl TestCase for Broken {
    fn metadata(&self) -> CaseMetadata {
        CaseMetadata {
            name: "broken".to_string(),
            description: "raises an unexpected error".to_string(),
            priority: 0,
        }
    }

    async fn run(&self, _node: &Node, _ctx: &mut CaseContext) -> Result<(), CaseSignal> {
        Err(CaseSignal::Unexpected("index out of range".to_string()))
    }
}

/// Case whose body panics
struct Panicking;

#[async_trait]
impl TestCase for Panicking {
    fn metadata(&self) -> CaseMetadata {
        CaseMetadata {
            name: "panicking".to_string(),
            description: "indexes past the end of an empty list".to_string(),
            priority: 0,
        }
    }

    async fn run(&self, _node: &Node, _ctx: &mut CaseContext) -> Result<(), CaseSignal> {
        let empty: Vec<u8> = Vec::new();
        std::hint::black_box(empty[3]);
        Ok(())
    }
}

fn custom_suite(first: bool) -> TestSuite {
    TestSuite::new(SuiteMetadata {
        name: "custom".to_string(),
        area: "meta".to_string(),
        category: "functional".to_string(),
        description: "runner behavior".to_string(),
    })
    .case(AssertThenSkip { first })
    .case(Broken)
}

#[cfg(test)]
mod runner_tests {
    use super::*;

    #[tokio::test]
    async fn test_skip_after_assertion_keeps_result() {
        let (_, node) = node_with("n1", MockRunner::new());

        let passing = SuiteRunner::new(vec![custom_suite(true)], only("assert_then_skip"));
        let results = passing.run_node(&node).await;
        let result = find(&results, "assert_then_skip");
        assert_eq!(result.state, CaseState::Passed);
        assert_eq!(result.assertions.len(), 1);
        assert!(result.message.as_deref().unwrap().contains("precondition found late"));

        let failing = SuiteRunner::new(vec![custom_suite(false)], only("assert_then_skip"));
        let results = failing.run_node(&node).await;
        assert_eq!(find(&results, "assert_then_skip").state, CaseState::Failed);
    }

    #[tokio::test]
    async fn test_unexpected_error_is_errored() {
        let (_, node) = node_with("n1", MockRunner::new());
        let runner = SuiteRunner::new(vec![custom_suite(true)], only("broken"));

        let results = runner.run_node(&node).await;
        let result = find(&results, "broken");
        assert_eq!(result.state, CaseState::Errored);
        assert!(result.message.as_deref().unwrap().contains("index out of range"));
    }

    /// A panicking body is errored and the remaining cases and nodes still run
    #[tokio::test]
    async fn test_panicking_case_is_errored() {
        let (_, n1) = node_with("n1", MockRunner::new());
        let (_, n2) = node_with("n2", MockRunner::new());
        let suite = custom_suite(true).case(Panicking);
        let runner = SuiteRunner::new(vec![suite], RunConfig::default());

        let results = runner.run_nodes(&[n1, n2]).await;
        assert_eq!(results.len(), 6);

        for node in ["n1", "n2"] {
            let panicked = results
                .iter()
                .find(|r| r.node == node && r.case == "panicking")
                .unwrap();
            assert_eq!(panicked.state, CaseState::Errored);
            assert!(panicked.message.as_deref().unwrap().contains("index out of bounds"));

            let later = results
                .iter()
                .find(|r| r.node == node && r.case == "assert_then_skip")
                .unwrap();
            assert_eq!(later.state, CaseState::Passed);
        }
    }

    #[tokio::test]
    async fn test_priority_order_and_filter() {
        let mut suites = testsuites::all();
        suites.push(custom_suite(true));

        let everything = SuiteRunner::new(suites, RunConfig::default());
        let names: Vec<String> = everything
            .case_names()
            .into_iter()
            .map(|(_, case)| case)
            .collect();
        assert_eq!(
            names,
            vec![
                "broken",
                "check_floppy_module",
                "check_loopback_interface",
                "assert_then_skip"
            ]
        );

        let config = RunConfig::parse("max_priority = 1\nexclude = [\"custom.broken\"]\n").unwrap();
        let filtered = SuiteRunner::new(testsuites::all(), config);
        assert_eq!(filtered.case_count(), 1);
    }

    /// Each node gets its own results, and each node's OS drives its outcome
    #[tokio::test]
    async fn test_run_nodes_concurrently() {
        init_tracing();

        let (_, bsd) = node_with(
            "bsd",
            MockRunner::freebsd().reply("ifconfig -l", ExecutionOutcome::success("vtnet0 lo0")),
        );
        let (_, ubuntu) = node_with(
            "ubuntu",
            MockRunner::linux(UBUNTU_OS_RELEASE).reply(FLOPPY_DRY_RUN, floppy_not_loaded()),
        );
        let runner = SuiteRunner::new(testsuites::all(), RunConfig::default());

        let results = runner.run_nodes(&[bsd, ubuntu]).await;
        assert_eq!(results.len(), 4);

        let state = |node: &str, case: &str| {
            results
                .iter()
                .find(|r| r.node == node && r.case == case)
                .map(|r| r.state)
                .unwrap()
        };
        assert_eq!(state("bsd", "check_loopback_interface"), CaseState::Passed);
        assert_eq!(state("bsd", "check_floppy_module"), CaseState::Failed);
        assert_eq!(state("ubuntu", "check_floppy_module"), CaseState::Passed);
        assert_eq!(state("ubuntu", "check_loopback_interface"), CaseState::Skipped);

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_success());
    }

    #[tokio::test]
    async fn test_results_serialize() {
        let (_, node) = node_with("n1", MockRunner::new());
        let runner = SuiteRunner::new(vec![custom_suite(true)], only("broken"));

        let results = runner.run_node(&node).await;
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json[0]["state"], "errored");
        assert_eq!(json[0]["node"], "n1");
    }
}
