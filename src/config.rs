//! Configuration loading
//!
//! Configuration is read from TOML. Every field is optional:
//!
//! ```toml
//! [sampler]
//! sample_limit = 3
//! search_budget = "5s"
//! ```

use crate::error::{ErrorCode, JobScopeError, Result};
use crate::failures::SamplerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Top-level jobscope configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobScopeConfig {
    #[serde(default)]
    pub sampler: SamplerConfig,
}

impl JobScopeConfig {
    /// Parse and validate configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: JobScopeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobScopeError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("Cannot read configuration file {}", path.display()),
            )
            .with_source(e)
        })?;

        debug!("Loading configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()
    }
}
