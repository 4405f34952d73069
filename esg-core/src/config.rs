//! Configuration for ESG workflows.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EsgError, Result};
use crate::scoring::DEFAULT_TOP_PRIORITIES;
use crate::types::ReportingFramework;

/// File name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "esg_config.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgConfig {
    /// Directory holding organization documents
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Directory for generated artifacts
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for EsgConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            output_path: default_output_path(),
            report: ReportConfig::default(),
            persistence: PersistenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EsgConfig {
    /// Load config from YAML text.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load from `path`, or from the first default location that exists.
    ///
    /// Default locations are `./esg_config.yaml` then `$HOME/.esg/config.yaml`.
    /// Falls back to defaults when no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_locations().into_iter().find(|p| p.exists()),
        };

        match candidate {
            Some(p) if p.exists() => {
                let raw = fs::read_to_string(&p)?;
                let config = Self::from_yaml(&raw).map_err(|e| {
                    EsgError::MalformedData(format!("{}: {}", p.display(), e))
                })?;
                tracing::debug!(path = %p.display(), "Loaded ESG config");
                Ok(config)
            }
            Some(p) => Err(EsgError::NotFound(p)),
            None => Ok(Self::default()),
        }
    }

    /// Write the config as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = self
            .to_yaml()
            .map_err(|e| EsgError::MalformedData(e.to_string()))?;
        fs::write(path, yaml)?;
        Ok(())
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".esg").join("config.yaml"));
        }
        paths
    }
}

/// Report defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Framework used when a caller names none
    #[serde(default)]
    pub default_framework: ReportingFramework,
    /// Number of issues listed as top priorities
    #[serde(default = "default_top_priorities")]
    pub top_priorities: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_framework: ReportingFramework::default(),
            top_priorities: default_top_priorities(),
        }
    }
}

/// Persistence options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Reject documents carrying fields the organization shape does not know
    #[serde(default)]
    pub reject_unknown_fields: bool,
    /// Pretty-print written documents
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            reject_unknown_fields: false,
            pretty: true,
        }
    }
}

/// Logging preferences for the host process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for a tracing subscriber, e.g. `esg_core=info,esg_agent=info`.
    pub fn filter_directive(&self) -> String {
        format!("esg_core={0},esg_agent={0}", self.level.to_lowercase())
    }
}

fn default_data_path() -> PathBuf { PathBuf::from("data") }
fn default_output_path() -> PathBuf { PathBuf::from("output") }
fn default_top_priorities() -> usize { DEFAULT_TOP_PRIORITIES }
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
