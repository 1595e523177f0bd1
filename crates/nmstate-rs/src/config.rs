//! Client configuration
//!
//! Parses the optional `~/.nmpilot/config.yaml` file.

use crate::error::NmstateError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_binary() -> String {
    "nmstatectl".to_string()
}

fn default_true() -> bool {
    true
}

/// nmpilot client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Path or name of the nmstatectl binary
    #[serde(default = "default_binary")]
    pub nmstatectl: String,
    /// Ask nmstate to verify the applied state
    #[serde(default = "default_true")]
    pub verify: bool,
    /// Write applied changes to the audit log
    #[serde(default = "default_true")]
    pub audit: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            nmstatectl: default_binary(),
            verify: true,
            audit: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default location (~/.nmpilot/config.yaml)
    ///
    /// A missing file yields the defaults.
    pub fn load_default() -> Result<Self, NmstateError> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, NmstateError> {
        if !path.exists() {
            return Err(NmstateError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> Result<Self, NmstateError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| NmstateError::ConfigInvalid(e.to_string()))
    }

    /// Get the default config path (~/.nmpilot/config.yaml)
    pub fn default_path() -> Result<PathBuf, NmstateError> {
        let home = dirs_next::home_dir().ok_or(NmstateError::NoHomeDirectory)?;
        Ok(home.join(".nmpilot").join("config.yaml"))
    }
}
