// ifconfig tool
#![allow(dead_code)]

use crate::tool::error::Result;
use crate::tool::traits::{Tool, ToolContext, ToolKind};
use async_trait::async_trait;

/// Network interface configuration
#[async_trait]
pub trait Ifconfig: Tool {
    /// Names of all network interfaces, in the order the node reports them
    async fn interface_list(&self) -> Result<Vec<String>> {
        Err(self.not_implemented("interface_list"))
    }
}

impl ToolKind for dyn Ifconfig {
    const NAME: &'static str = "ifconfig";
}

/// Default variant. Linux nodes should list interfaces with `ip` instead,
/// so listing is left unimplemented here.
pub struct IfconfigGeneric {
    ctx: ToolContext,
}

impl IfconfigGeneric {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

impl Tool for IfconfigGeneric {
    fn name(&self) -> &str {
        <dyn Ifconfig as ToolKind>::NAME
    }

    fn command(&self) -> &str {
        "ifconfig"
    }

    fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl Ifconfig for IfconfigGeneric {}

/// BSD variant, where `ifconfig -l` prints the interface names
pub struct IfconfigBsd {
    ctx: ToolContext,
}

impl IfconfigBsd {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }
}

impl Tool for IfconfigBsd {
    fn name(&self) -> &str {
        <dyn Ifconfig as ToolKind>::NAME
    }

    fn command(&self) -> &str {
        "ifconfig"
    }

    fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

#[async_trait]
impl Ifconfig for IfconfigBsd {
    async fn interface_list(&self) -> Result<Vec<String>> {
        let invocation = self
            .invocation()
            .arg("-l")
            .force_run(true)
            .expect_exit(0)
            .failure_message("Failed to get interface list")
            .build();

        let output = self.run(&invocation).await?;
        Ok(parse_interface_list(&output.stdout))
    }
}

/// Whitespace-separated interface names, order preserved
pub fn parse_interface_list(stdout: &str) -> Vec<String> {
    stdout.split_whitespace().map(str::to_string).collect()
}
