// Error types for Suite module

use crate::suite::types::CaseState;
use crate::tool::ToolError;
use thiserror::Error;

/// Why a case body stopped before returning `Ok`
#[derive(Debug, Error)]
pub enum CaseSignal {
    /// Precondition not met; not a failure
    #[error("Skipped: {0}")]
    Skipped(String),

    #[error("Assertion failed: {description}")]
    AssertionFailed {
        description: String,
        detail: Option<String>,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Illegal case state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid case state transition: {from} -> {to}")]
pub struct CaseStateError {
    pub from: CaseState,
    pub to: CaseState,
}

/// Run configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
