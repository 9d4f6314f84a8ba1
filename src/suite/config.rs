// Run configuration
#![allow(dead_code)]

use crate::suite::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which cases to run. Loaded from `run.toml`:
///
/// ```toml
/// max_priority = 2
/// include = ["floppy"]
/// exclude = ["network.check_loopback_interface"]
/// ```
///
/// Names match a suite name, a case name, or `suite.case`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Skip cases with a larger priority number
    pub max_priority: Option<u8>,
    /// When non-empty, only these run
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl RunConfig {
    /// Default config location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".nodecheck").join("run.toml"))
            .unwrap_or_else(|| PathBuf::from(".nodecheck/run.toml"))
    }

    /// Load from a TOML file; a missing file gives the default config
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "run config not found, running everything");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;

        debug!(
            path = %path.display(),
            max_priority = ?config.max_priority,
            include = config.include.len(),
            exclude = config.exclude.len(),
            "loaded run config"
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Whether a case is selected by this config
    pub fn selects(&self, suite: &str, case: &str, priority: u8) -> bool {
        if self.max_priority.is_some_and(|max| priority > max) {
            return false;
        }
        let full_name = format!("{}.{}", suite, case);
        let matches = |name: &String| name == suite || name == case || *name == full_name;

        if !self.include.is_empty() && !self.include.iter().any(matches) {
            return false;
        }
        !self.exclude.iter().any(matches)
    }
}
