//! Unified error types for csvalert
//!
//! Source-level errors abort an evaluation; row-level errors only skip a row.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error acquiring or parsing the tabular source
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (terminal output, file writes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that are fatal to a whole evaluation call
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source could not be opened
    #[error("Failed to open source '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The stream could not be read to completion
    #[error("Failed to read source: {0}")]
    Read(#[from] std::io::Error),

    /// A quoted field is unterminated or a quote appears inside an unquoted field
    #[error("Malformed quoting on line {line}: {fault}")]
    Quote { line: u64, fault: QuoteFault },

    /// The CSV reader rejected the record structure or its encoding
    #[error("Failed to parse source: {0}")]
    Parse(#[from] csv::Error),
}

/// Quoting faults that make a source invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteFault {
    /// A quoted field runs to the end of the input
    Unterminated,
    /// A closing quote is followed by something other than a delimiter or line end
    Extraneous,
    /// A quote inside a field that did not start with one
    Bare,
}

impl std::fmt::Display for QuoteFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unterminated => write!(f, "unterminated quoted field"),
            Self::Extraneous => write!(f, "extraneous or missing \" in quoted field"),
            Self::Bare => write!(f, "bare \" in unquoted field"),
        }
    }
}

/// Errors that skip a single row without aborting the batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The field selector did not resolve to a cell of this row
    #[error("Cannot resolve field {selector}: {reason}")]
    FieldResolution { selector: String, reason: String },

    /// The selected cell is not a number
    #[error("Invalid numeric value '{value}' in field {selector}")]
    ValueParse { selector: String, value: String },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// .env file could not be read
    #[error("Failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

impl ConfigError {
    /// Shorthand for an invalid value error
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
