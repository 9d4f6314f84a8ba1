// Network suite

use crate::node::Node;
use crate::suite::{CaseContext, CaseMetadata, CaseSignal, SuiteMetadata, TestCase, TestSuite};
use crate::tool::{Ifconfig, ToolError};
use async_trait::async_trait;

pub fn suite() -> TestSuite {
    TestSuite::new(SuiteMetadata {
        name: "network".to_string(),
        area: "network".to_string(),
        category: "functional".to_string(),
        description: "Basic network interface checks.".to_string(),
    })
    .case(LoopbackInterface)
}

/// The node reports at least one interface, one of them a loopback device
pub struct LoopbackInterface;

#[async_trait]
impl TestCase for LoopbackInterface {
    fn metadata(&self) -> CaseMetadata {
        CaseMetadata {
            name: "check_loopback_interface".to_string(),
            description: "Lists network interfaces and looks for loopback.".to_string(),
            priority: 2,
        }
    }

    async fn run(&self, node: &Node, ctx: &mut CaseContext) -> Result<(), CaseSignal> {
        let ifconfig = node.tool::<dyn Ifconfig>().await?;
        let interfaces = match ifconfig.interface_list().await {
            Ok(interfaces) => interfaces,
            Err(ToolError::OperationNotImplemented { binding, .. }) => {
                let reason = format!("interface listing is not available for {}", binding);
                return Err(ctx.skip(reason));
            }
            Err(e) => return Err(e.into()),
        };

        let has_loopback = interfaces.iter().any(|name| name.starts_with("lo"));
        ctx.assert_that(interfaces, "node reports network interfaces")
            .is_not_empty()?;
        ctx.assert_that(has_loopback, "a loopback interface is present")
            .is_true()
    }
}
