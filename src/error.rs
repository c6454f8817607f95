//! Error types and exit codes for docsym

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for docsym operations
#[derive(Error, Debug)]
pub enum DocsymError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Duplicate key '{key}' in distinct records")]
    DuplicateKey { key: String },

    #[error("Malformed record #{index}: {message}")]
    MalformedRecord { index: usize, message: String },

    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocsymError {
    /// Convert error to an exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Configuration error
    /// - 3: Data file syntax error
    /// - 4: Malformed record
    /// - 5: Duplicate key
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
            Self::Config { .. } => ExitCode::from(2),
            Self::Parse { .. } => ExitCode::from(3),
            Self::MalformedRecord { .. } => ExitCode::from(4),
            Self::DuplicateKey { .. } => ExitCode::from(5),
        }
    }

    pub(crate) fn malformed(index: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            message: message.into(),
        }
    }
}

/// Result type alias for docsym operations
pub type Result<T> = std::result::Result<T, DocsymError>;
