// Core suite: kernel module checks

use crate::node::Node;
use crate::os::{OsFamily, OsVersion};
use crate::suite::{CaseContext, CaseMetadata, CaseSignal, SuiteMetadata, TestCase, TestSuite};
use crate::tool::Modprobe;
use async_trait::async_trait;

pub fn suite() -> TestSuite {
    TestSuite::new(SuiteMetadata {
        name: "core".to_string(),
        area: "core".to_string(),
        category: "functional".to_string(),
        description: "Ensures the floppy driver is disabled. It is not needed on cloud \
                      images and is known to cause problems in some scenarios."
            .to_string(),
    })
    .case(FloppyModule)
}

/// The floppy module must not be loaded.
///
/// Older CentOS releases never received the fix, so they are skipped.
pub struct FloppyModule;

/// First CentOS release that blacklists the floppy module
fn centos_fixed_version() -> OsVersion {
    OsVersion::new(vec![7, 8, 0])
}

#[async_trait]
impl TestCase for FloppyModule {
    fn metadata(&self) -> CaseMetadata {
        CaseMetadata {
            name: "check_floppy_module".to_string(),
            description: "Dry-runs modprobe for the floppy module; it must report the \
                          module as not loaded."
                .to_string(),
            priority: 1,
        }
    }

    async fn run(&self, node: &Node, ctx: &mut CaseContext) -> Result<(), CaseSignal> {
        let os = node.os().await?;
        if os.family == OsFamily::CentOs && os.version < centos_fixed_version() {
            return Err(ctx.skip(format!(
                "CentOS {} is older than {} and does not receive fixes for this issue",
                os.version,
                centos_fixed_version()
            )));
        }

        let modprobe = node.tool::<dyn Modprobe>().await?;
        let loaded = modprobe.is_module_loaded("floppy").await?;

        ctx.assert_that(
            loaded,
            "The floppy module should not be loaded. Try adding the module to the blacklist.",
        )
        .is_false()
    }
}
