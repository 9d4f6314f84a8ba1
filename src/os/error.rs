// Error types for OS detection

use crate::executor::ExecutionFailure;
use thiserror::Error;

/// OS detection errors
#[derive(Debug, Error)]
pub enum OsError {
    #[error("OS detection failed: {0}")]
    Detection(#[from] ExecutionFailure),
}
