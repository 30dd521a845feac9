use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the rental dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured input path does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// An input file lacks one of the columns the dashboard requires.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// The CSV reader rejected an input file.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// A dataframe operation failed outside of file parsing.
    #[error("Dataframe error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),

    /// A grouping column name outside the supported set.
    #[error("Invalid group column: {0} (expected 'rideable_type' or 'member_casual')")]
    InvalidColumn(String),

    /// The configured timestamp cleanup pattern is not a valid regex.
    #[error("Invalid strip pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A JSON document could not be produced.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
