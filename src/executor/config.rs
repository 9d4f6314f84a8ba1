// Executor configuration
#![allow(dead_code)]

use crate::executor::types::ExecutionConstraints;
use tracing::warn;

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Default execution constraints
    pub constraints: ExecutionConstraints,
    /// Shell path for command execution
    pub shell: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            constraints: ExecutionConstraints::default(),
            shell: String::from("/bin/sh"),
        }
    }
}

impl ExecutorConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = ExecutorConfig::default();

        config.constraints.timeout_secs =
            parse_env_var("NODECHECK_TIMEOUT_SECS", config.constraints.timeout_secs);
        config.constraints.max_output_bytes = parse_env_var(
            "NODECHECK_MAX_OUTPUT_BYTES",
            config.constraints.max_output_bytes,
        );
        config.shell = parse_env_var("NODECHECK_SHELL", config.shell);
        if let Ok(dir) = std::env::var("NODECHECK_WORKING_DIR") {
            config.constraints.working_dir = Some(dir.into());
        }

        config
    }
}
