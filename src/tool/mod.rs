// Tool module - OS-specific tool variants and their registry
#![allow(unused_imports)]

pub mod error;
pub mod ifconfig;
pub mod modprobe;
pub mod registry;
pub mod traits;

pub use error::{Result, ToolError};
pub use ifconfig::Ifconfig;
pub use modprobe::Modprobe;
pub use registry::{Registry, Resolved};
pub use traits::{Binding, Tool, ToolContext, ToolId, ToolKind};
