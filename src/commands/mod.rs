//! Command modules for the docsym CLI
//!
//! Each command module implements a single top-level command:
//! - `lookup` - Find entries for a symbol name or key prefix
//! - `keys` - List index keys
//! - `check` - Build the index and report its shape
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` for output format, verbosity and config.

pub mod check;
pub mod keys;
pub mod lookup;

pub use check::run_check;
pub use keys::run_keys;
pub use lookup::run_lookup;

use std::path::PathBuf;

use crate::cli::{DataArgs, OutputFormat};
use crate::config::DocsymConfig;
use crate::error::{DocsymError, Result};
use crate::index::SymbolIndex;
use crate::loader::load_index;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Output format (text, toon, or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
    /// Loaded configuration
    pub config: DocsymConfig,
}

impl CommandContext {
    pub fn new(format: OutputFormat, verbose: bool, config: DocsymConfig) -> Self {
        Self {
            format,
            verbose,
            config,
        }
    }

    /// Resolve the data paths for a command
    pub fn data_paths(&self, source: &DataArgs) -> Result<Vec<PathBuf>> {
        let paths = source.paths(&self.config);
        if paths.is_empty() {
            return Err(DocsymError::Config {
                message: "no search data given; pass --data or set index.data in the config file"
                    .to_string(),
            });
        }
        Ok(paths)
    }

    /// Load the index a command operates on
    pub fn open_index(&self, source: &DataArgs) -> Result<SymbolIndex> {
        let paths = self.data_paths(source)?;
        load_index(&paths, &source.load_options(&self.config))
    }
}

/// Encode a JSON value as proper TOON using the rtoon library
pub fn encode_toon(value: &serde_json::Value) -> String {
    rtoon::encode_default(value).unwrap_or_else(|e| format!("TOON encoding error: {}", e))
}

/// Render a JSON value in a structured format; `None` for text output
pub(crate) fn render_structured(format: OutputFormat, value: &serde_json::Value) -> Option<String> {
    match format {
        OutputFormat::Json => Some(serde_json::to_string_pretty(value).unwrap_or_default()),
        OutputFormat::Toon => Some(encode_toon(value)),
        OutputFormat::Text => None,
    }
}
