// crates/revpipe-core/src/error.rs

use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {name} data from {}: {source}", path.display())]
    Load {
        name: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed header in {}: {reason}", path.display())]
    MalformedHeader { path: PathBuf, reason: String },

    #[error("{name} data is missing required column '{column}'")]
    MissingColumn {
        name: &'static str,
        column: String,
    },

    #[error("column '{column}' has type {dtype}, expected a numeric type")]
    NonNumericColumn { column: String, dtype: String },

    #[error("failed to write output to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("Config parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
