use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::sources::SourceKind;

/// A source table read from disk together with its provenance details.
#[derive(Debug)]
pub struct LoadedSource {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub frame: DataFrame,
    pub content_hash: String,
}

/// Reads a delimited-text source into a DataFrame. Column names come from the
/// header row; types are inferred from content, with date-like columns parsed
/// as dates. The header must name every column the downstream contract
/// references for this source.
pub fn load_source(kind: SourceKind, path: &Path) -> Result<LoadedSource> {
    let descriptor = kind.descriptor();

    let contents = fs::read(path).map_err(|source| PipelineError::Load {
        name: descriptor.name,
        path: path.to_path_buf(),
        source,
    })?;

    let header = read_header(path, &contents)?;
    for column in descriptor.required_columns {
        if !header.iter().any(|field| field == column) {
            return Err(PipelineError::MissingColumn {
                name: descriptor.name,
                column: (*column).to_string(),
            });
        }
    }

    let content_hash = blake3::hash(&contents).to_hex().to_string();

    let cursor = Cursor::new(contents.as_slice());
    let parse_options = CsvParseOptions::default().with_try_parse_dates(true);
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(cursor)
        .finish()?;

    debug!(
        source = descriptor.name,
        rows = frame.height(),
        columns = frame.width(),
        "loaded source table"
    );

    Ok(LoadedSource {
        kind,
        path: path.to_path_buf(),
        frame,
        content_hash,
    })
}

fn read_header(path: &Path, contents: &[u8]) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(contents);

    let first = match reader.records().next() {
        Some(record) => record.map_err(|err| PipelineError::MalformedHeader {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?,
        None => {
            return Err(PipelineError::MalformedHeader {
                path: path.to_path_buf(),
                reason: "file is empty".to_string(),
            })
        }
    };

    let fields: Vec<String> = first.iter().map(|field| field.trim().to_string()).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    for field in &fields {
        if field.is_empty() {
            return Err(PipelineError::MalformedHeader {
                path: path.to_path_buf(),
                reason: "header contains an empty column name".to_string(),
            });
        }
        if !seen.insert(field.as_str()) {
            return Err(PipelineError::MalformedHeader {
                path: path.to_path_buf(),
                reason: format!("duplicate column '{field}'"),
            });
        }
    }

    Ok(fields)
}
