//! Error types for the exporter.
//!
//! Parser failures are limited to grammar problems and arrive through
//! [`ExportError::Parser`]. Everything else is I/O or serialization.

use std::path::PathBuf;

use qanun_parser::ParserError;
use thiserror::Error;

/// Main error type for the exporter library.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Grammar rejected by the parser.
    #[error("Invalid grammar: {0}")]
    Parser(#[from] ParserError),

    /// Grammar file is not valid YAML for a grammar.
    #[error("Failed to load grammar from {}: {source}", .path.display())]
    GrammarFile {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Input file does not exist.
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory does not exist.
    #[error("Output directory does not exist: {}", .0.display())]
    OutputDirMissing(PathBuf),

    /// Output path exists but is a file.
    #[error("Output path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;
