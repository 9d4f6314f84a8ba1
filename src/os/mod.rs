// OS module - family/version descriptor of a node and its detection
#![allow(unused_imports)]

pub mod detect;
pub mod error;
pub mod types;

pub use detect::detect;
pub use error::OsError;
pub use types::{OsDescriptor, OsFamily, OsInfo, OsVersion};
