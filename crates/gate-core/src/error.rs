use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the gate reporting crates.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The expected export directory or file does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No JSON export files were found under the given directory.
    #[error("No export files found in {0}")]
    NoDataFiles(PathBuf),

    /// The requested employee is not present in the employee export.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(i64),

    /// Access logs could not be retrieved from the log source.
    #[error("Failed to fetch access logs: {0}")]
    Fetch(String),
}

/// Convenience alias used throughout the gate crates.
pub type Result<T> = std::result::Result<T, ReportError>;
