// Tool traits and identifiers
#![allow(dead_code)]

use crate::executor::{CommandInvocation, ExecutionOutcome, Shell};
use crate::os::{OsFamily, OsInfo};
use crate::tool::error::{Result, ToolError};
use async_trait::async_trait;
use serde::Serialize;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// A capability family, identified by its trait object type.
///
/// Implemented for `dyn Ifconfig`, `dyn Modprobe`, etc. so that callers ask
/// for `node.tool::<dyn Ifconfig>()`.
pub trait ToolKind: Tool + 'static {
    const NAME: &'static str;
}

/// Runtime key of a [`ToolKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolId {
    name: &'static str,
    type_id: TypeId,
}

impl ToolId {
    pub fn of<K: ToolKind + ?Sized>() -> Self {
        Self {
            name: K::NAME,
            type_id: TypeId::of::<K>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Which registration a tool instance was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Binding {
    Family(OsFamily),
    Default,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Family(family) => write!(f, "{}", family),
            Binding::Default => f.write_str("default"),
        }
    }
}

/// Everything a tool variant is constructed with
#[derive(Clone)]
pub struct ToolContext {
    pub shell: Arc<Shell>,
    pub os: OsInfo,
    pub binding: Binding,
}

/// Base trait of every tool variant
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool family name, used in errors
    fn name(&self) -> &str;

    /// Executable invoked on the node
    fn command(&self) -> &str;

    fn context(&self) -> &ToolContext;

    fn binding(&self) -> Binding {
        self.context().binding
    }

    /// Start an invocation of this tool's command
    fn invocation(&self) -> crate::executor::types::CommandInvocationBuilder {
        CommandInvocation::builder(self.command())
    }

    /// Run an invocation on the node the tool is bound to
    async fn run(&self, invocation: &CommandInvocation) -> Result<ExecutionOutcome> {
        Ok(self.context().shell.run(invocation).await?)
    }

    /// Error for an operation this variant does not provide
    fn not_implemented(&self, operation: &'static str) -> ToolError {
        ToolError::OperationNotImplemented {
            tool: self.name().to_string(),
            operation,
            binding: self.binding(),
        }
    }
}
