// modprobe tool
#![allow(dead_code)]

use crate::executor::ExpectedExit;
use crate::tool::error::Result;
use crate::tool::traits::{Tool, ToolContext, ToolKind};
use async_trait::async_trait;
use tracing::debug;

/// Kernel module management
#[async_trait]
pub trait Modprobe: Tool {
    /// Whether `module` is currently loaded into the kernel
    async fn is_module_loaded(&self, _module: &str) -> Result<bool> {
        Err(self.not_implemented("is_module_loaded"))
    }
}

impl ToolKind for dyn Modprobe {
    const NAME: &'static str = "modprobe";
}

/// Linux variant.
///
/// A dry run (`modprobe -nv`) prints the `insmod` steps it would take, so an
/// already-loaded module produces no `insmod` line. A module that cannot be
/// found is not loaded.
pub struct ModprobeLinux {
    ctx: ToolContext,
}

impl ModprobeLinux {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

impl Tool for ModprobeLinux {
    fn name(&self) -> &str {
        <dyn Modprobe as ToolKind>::NAME
    }

    fn command(&self) -> &str {
        "modprobe"
    }

    fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

#[async_trait]
impl Modprobe for ModprobeLinux {
    async fn is_module_loaded(&self, module: &str) -> Result<bool> {
        let dry_run = self
            .invocation()
            .arg("-nv")
            .arg(module)
            .force_run(true)
            .expect_exit(ExpectedExit::Any)
            .build();
        let output = self.run(&dry_run).await?;

        if output.exit_code != Some(0) && is_missing_module(&output.stdout, &output.stderr) {
            debug!(module = %module, "module not found");
            return Ok(false);
        }

        let failure_message = format!("Failed to query module {}", module);
        let output = crate::executor::validate(
            &dry_run.command_line(),
            output,
            &ExpectedExit::Code(0),
            &failure_message,
        )?;

        Ok(!would_insert(&output.stdout))
    }
}

fn is_missing_module(stdout: &str, stderr: &str) -> bool {
    stdout.contains("not found") || stderr.contains("not found")
}

fn would_insert(stdout: &str) -> bool {
    stdout
        .lines()
        .any(|line| line.trim_start().starts_with("insmod"))
}
