//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::DocsymConfig;
use crate::index::MatchMode;
use crate::loader::LoadOptions;

/// Symbol lookup over generated documentation search indexes
#[derive(Parser, Debug)]
#[command(name = "docsym")]
#[command(about = "Look up documented symbols in generated search-data files")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", env = "DOCSYM_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

// ============================================
// Main Commands Enum
// ============================================

/// Available subcommands for docsym
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find entries by exact key or case-insensitive prefix
    #[command(visible_alias = "l")]
    Lookup(LookupArgs),

    /// List index keys in order
    #[command(visible_alias = "k")]
    Keys(KeysArgs),

    /// Build the index and report problems
    Check(CheckArgs),
}

// ============================================
// Shared Data Source Arguments
// ============================================

/// Where to read search data from
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Search-data file or `search/` directory (can be repeated)
    #[arg(short, long = "data", value_name = "PATH")]
    pub data: Vec<PathBuf>,

    /// Only read `<SECTION>_<n>.js` files from directories
    #[arg(long, value_name = "SECTION")]
    pub section: Option<String>,

    /// Merge repeated keys instead of failing
    #[arg(long)]
    pub merge: bool,
}

impl DataArgs {
    /// Data paths from the flags, falling back to the configuration
    pub fn paths(&self, config: &DocsymConfig) -> Vec<PathBuf> {
        if self.data.is_empty() {
            config.index.data.clone()
        } else {
            self.data.clone()
        }
    }

    /// Load options with flags layered over the configuration
    pub fn load_options(&self, config: &DocsymConfig) -> LoadOptions {
        let mut options = config.index.load_options();
        if let Some(section) = &self.section {
            options.section = Some(section.clone());
        }
        if self.merge {
            options.build.merge_duplicates = true;
        }
        options
    }
}

// ============================================
// Lookup Subcommand
// ============================================

/// Arguments for the lookup command
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Symbol name or key prefix (empty matches everything)
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub source: DataArgs,

    /// Match mode (defaults to the configured mode, normally `auto`)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum number of entries to show (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Resolve relative links against this URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

// ============================================
// Keys Subcommand
// ============================================

/// Arguments for the keys command
#[derive(Args, Debug)]
pub struct KeysArgs {
    #[command(flatten)]
    pub source: DataArgs,

    /// Only list keys starting with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Maximum number of keys to show (0 = unlimited)
    #[arg(long, value_name = "N", default_value = "0")]
    pub limit: usize,
}

// ============================================
// Check Subcommand
// ============================================

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: DataArgs,
}

// ============================================
// Shared Types
// ============================================

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default for terminal)
    #[default]
    #[value(alias = "pretty")]
    Text,
    /// TOON (Token-Oriented Object Notation) - token-efficient format
    Toon,
    /// JSON - standard JSON output for machine parsing
    Json,
}

/// Match mode as accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Exact key if present, otherwise prefix matches
    Auto,
    /// Exact key only
    Exact,
    /// All keys starting with the query
    Prefix,
    /// All keys containing the query
    #[value(alias = "contains")]
    Substring,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => MatchMode::Auto,
            ModeArg::Exact => MatchMode::Exact,
            ModeArg::Prefix => MatchMode::Prefix,
            ModeArg::Substring => MatchMode::Substring,
        }
    }
}

// ============================================
// Helper Implementations
// ============================================

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl LookupArgs {
    pub fn match_mode(&self, config: &DocsymConfig) -> MatchMode {
        self.mode.map(MatchMode::from).unwrap_or(config.search.mode)
    }

    pub fn effective_limit(&self, config: &DocsymConfig) -> usize {
        self.limit.unwrap_or(config.search.limit)
    }

    pub fn effective_base_url<'a>(&'a self, config: &'a DocsymConfig) -> Option<&'a str> {
        self.base_url
            .as_deref()
            .or(config.index.base_url.as_deref())
    }
}
