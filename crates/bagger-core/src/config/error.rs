//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("I/O error for {path}: {message}")]
    IoError { path: PathBuf, message: String },

    /// TOML parse error
    #[error("TOML parse error in {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A `${name}` placeholder matched neither a key nor an environment variable
    #[error("Unresolved placeholder '${{{name}}}' in '{key}'")]
    UnresolvedPlaceholder { key: String, name: String },

    /// Placeholders refer to each other in a loop
    #[error("Placeholder cycle while resolving '{key}'")]
    PlaceholderCycle { key: String },

    /// Merged settings have the wrong shape
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl ConfigError {
    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError { .. } => "IO_ERROR",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::UnresolvedPlaceholder { .. } | Self::PlaceholderCycle { .. } => "PLACEHOLDER_ERROR",
            Self::InvalidSettings(_) => "VALIDATION_ERROR",
        }
    }
}
