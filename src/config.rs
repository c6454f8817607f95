//! docsym configuration management.
//!
//! Handles the configuration file at:
//! - Linux: ~/.config/docsym/config.toml
//! - macOS: ~/Library/Application Support/docsym/config.toml
//! - Windows: %APPDATA%\docsym\config.toml
//!
//! A missing file yields the defaults. Command-line flags override values
//! read from the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocsymError, Result};
use crate::index::{BuildOptions, MatchMode};
use crate::loader::LoadOptions;

/// docsym configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DocsymConfig {
    /// Data source settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Query defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where search data comes from and how it is combined
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IndexConfig {
    /// Search-data files or directories
    #[serde(default)]
    pub data: Vec<PathBuf>,

    /// Restrict directories to one section (`all`, `functions`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Merge repeated keys instead of rejecting them
    #[serde(default)]
    pub merge_duplicates: bool,

    /// Base used to resolve relative documentation links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl IndexConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            section: self.section.clone(),
            build: BuildOptions {
                merge_duplicates: self.merge_duplicates,
            },
        }
    }
}

/// Query defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: MatchMode,

    /// Maximum results per query (0 = unlimited)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            limit: default_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DocsymConfig {
    /// Default configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docsym").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        // Relative data paths are relative to the config file
        if let Some(base) = path.parent() {
            for data in &mut config.index.data {
                if data.is_relative() {
                    *data = base.join(&*data);
                }
            }
        }

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DocsymError::Config {
            message: format!("Failed to parse config: {}", e),
        })
    }

    /// Serialize configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DocsymError::Config {
            message: format!("Failed to serialize config: {}", e),
        })
    }
}
