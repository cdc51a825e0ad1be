//! Error handling for jurisdiction extraction operations.
//!
//! Provides error types with enough context (source, line number, raw
//! content, station key) to diagnose a failing national adjustment file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NadjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error(
        "Malformed record in {source_name} at line {line_number}: expected at least {required} characters, found {found}: {line:?}"
    )]
    MalformedRecord {
        source_name: String,
        line_number: usize,
        line: String,
        required: usize,
        found: usize,
    },

    #[error("No positional uncertainty entry for mapped station '{station}'")]
    UnmappedUncertainty { station: String },

    #[error("Header block of {source_name} is truncated: expected {required} lines, found {found}")]
    TruncatedHeader {
        source_name: String,
        required: usize,
        found: usize,
    },

    #[error("Invalid mapping source: {path} - {reason}")]
    MappingSource { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl NadjError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NadjError>;
