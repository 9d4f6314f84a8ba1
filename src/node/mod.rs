// Node module - a session with one target machine
#![allow(dead_code)]

use crate::executor::{CommandInvocation, CommandRunner, ExecutionOutcome, Shell};
use crate::os::{self, OsInfo};
use crate::tool::{Registry, Resolved, ToolError, ToolId, ToolKind};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};
use uuid::Uuid;

/// A session with one target.
///
/// Owns the shell (one in-flight command at a time), the detected OS and the
/// tool instances resolved for it. [`Node::close`] drops all of them.
pub struct Node {
    id: Uuid,
    name: String,
    shell: Arc<Shell>,
    registry: Arc<Registry>,
    os: OnceCell<OsInfo>,
    tools: Mutex<HashMap<ToolId, Box<dyn Any + Send + Sync>>>,
}

impl Node {
    pub fn new(
        name: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
        registry: Arc<Registry>,
    ) -> Self {
        let node = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            shell: Arc::new(Shell::new(runner)),
            registry,
            os: OnceCell::new(),
            tools: Mutex::new(HashMap::new()),
        };
        debug!(node = %node.name, id = %node.id, "node session created");
        node
    }

    /// Use a known OS instead of detecting it
    pub fn with_os(self, info: OsInfo) -> Self {
        let os = OnceCell::new_with(Some(info));
        Self { os, ..self }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS of the node, detected on first use and kept for the session
    pub async fn os(&self) -> Result<&OsInfo, ToolError> {
        let info = self
            .os
            .get_or_try_init(|| async { os::detect(&self.shell).await })
            .await?;
        Ok(info)
    }

    /// The tool instance for this node, resolved on first request
    pub async fn tool<K: ToolKind + ?Sized>(&self) -> Result<Resolved<K>, ToolError> {
        let id = ToolId::of::<K>();
        let os = self.os().await?.clone();

        let mut tools = self.tools.lock().await;
        if let Some(cached) = tools.get(&id).and_then(|t| t.downcast_ref::<Resolved<K>>()) {
            return Ok(cached.clone());
        }

        let resolved = self.registry.resolve::<K>(&os, Arc::clone(&self.shell))?;
        info!(
            node = %self.name,
            tool = %id,
            binding = %resolved.binding(),
            "tool attached"
        );
        tools.insert(id, Box::new(resolved.clone()));
        Ok(resolved)
    }

    /// Run a raw invocation on the node
    pub async fn execute(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<ExecutionOutcome, ToolError> {
        Ok(self.shell.run(invocation).await?)
    }

    pub async fn attached_tools(&self) -> usize {
        self.tools.lock().await.len()
    }

    /// End the session: drop tool instances, cached outcomes and the OS
    pub async fn close(&mut self) {
        self.tools.lock().await.clear();
        self.shell.clear_cache().await;
        self.os.take();
        info!(node = %self.name, id = %self.id, "node session closed");
    }
}
