// Built-in test suites

pub mod kernel;
pub mod network;

use crate::suite::TestSuite;

/// Every built-in suite
pub fn all() -> Vec<TestSuite> {
    vec![kernel::suite(), network::suite()]
}
