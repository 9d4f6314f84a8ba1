// Assertions and skip signal available to case bodies
#![allow(dead_code)]

use crate::suite::error::CaseSignal;
use crate::suite::types::AssertionRecord;
use std::fmt::Debug;

/// Per-case recorder handed to [`TestCase::run`](super::TestCase::run)
#[derive(Debug, Default)]
pub struct CaseContext {
    assertions: Vec<AssertionRecord>,
}

impl CaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an assertion on `value`
    pub fn assert_that<T>(
        &mut self,
        value: T,
        description: impl Into<String>,
    ) -> Assertion<'_, T> {
        Assertion {
            ctx: self,
            value,
            description: description.into(),
        }
    }

    /// Abort the case as skipped
    pub fn skip(&self, reason: impl Into<String>) -> CaseSignal {
        CaseSignal::Skipped(reason.into())
    }

    pub fn assertions(&self) -> &[AssertionRecord] {
        &self.assertions
    }

    pub fn into_assertions(self) -> Vec<AssertionRecord> {
        self.assertions
    }

    fn record(
        &mut self,
        description: String,
        passed: bool,
        detail: Option<String>,
    ) -> Result<(), CaseSignal> {
        self.assertions.push(AssertionRecord {
            description: description.clone(),
            passed,
            detail: detail.clone(),
        });
        if passed {
            Ok(())
        } else {
            Err(CaseSignal::AssertionFailed {
                description,
                detail,
            })
        }
    }
}

/// A pending assertion. Every check records its result in the context.
pub struct Assertion<'a, T> {
    ctx: &'a mut CaseContext,
    value: T,
    description: String,
}

impl<T> Assertion<'_, T> {
    fn check(self, passed: bool, detail: impl FnOnce(&T) -> String) -> Result<(), CaseSignal> {
        let detail = (!passed).then(|| detail(&self.value));
        self.ctx.record(self.description, passed, detail)
    }
}

impl Assertion<'_, bool> {
    pub fn is_true(self) -> Result<(), CaseSignal> {
        let passed = self.value;
        self.check(passed, |_| "expected true but was false".to_string())
    }

    pub fn is_false(self) -> Result<(), CaseSignal> {
        let passed = !self.value;
        self.check(passed, |_| "expected false but was true".to_string())
    }
}

impl<T: PartialEq + Debug> Assertion<'_, T> {
    pub fn is_equal_to(self, expected: T) -> Result<(), CaseSignal> {
        let passed = self.value == expected;
        self.check(passed, |v| format!("expected {:?} but was {:?}", expected, v))
    }
}

impl<U: PartialEq + Debug> Assertion<'_, Vec<U>> {
    pub fn contains(self, item: &U) -> Result<(), CaseSignal> {
        let passed = self.value.contains(item);
        self.check(passed, |v| format!("expected {:?} to contain {:?}", v, item))
    }

    pub fn is_not_empty(self) -> Result<(), CaseSignal> {
        let passed = !self.value.is_empty();
        self.check(passed, |_| "expected a non-empty list".to_string())
    }
}
