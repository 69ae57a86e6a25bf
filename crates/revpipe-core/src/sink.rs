use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Writes the aggregate as a single headered CSV file at `path`, replacing
/// any previous artifact. A failure mid-write leaves the destination in an
/// undefined state; there is no partial-write recovery.
pub fn write_summary(summary: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let mut out = summary.clone();
    CsvWriter::new(file).include_header(true).finish(&mut out)?;

    debug!(path = %path.display(), rows = summary.height(), "wrote revenue summary");

    Ok(())
}
