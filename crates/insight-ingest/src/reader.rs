//! Delimited-text reading through Polars.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use insight_model::Dataset;

use crate::convert::dataset_from_frame;
use crate::error::{IngestError, Result};

/// Maximum file size for loading (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Rows sampled for schema inference by default.
pub const DEFAULT_INFER_SCHEMA_ROWS: usize = 100;

/// Options controlling how a file is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Field separator. `None` infers from the extension (tab for `.tsv`).
    pub delimiter: Option<u8>,
    /// Rows sampled for dtype inference. `None` scans the whole file.
    pub infer_schema_rows: Option<usize>,
    /// Upper bound on the file size in bytes.
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            infer_schema_rows: Some(DEFAULT_INFER_SCHEMA_ROWS),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    #[must_use]
    pub fn with_infer_schema_rows(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

fn io_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 input; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| io_error(path, e))?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Resolve the separator from options or the file extension.
pub fn resolve_delimiter(path: &Path, options: &IngestOptions) -> Result<u8> {
    if let Some(delimiter) = options.delimiter {
        return Ok(delimiter);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" | "txt" | "" => Ok(b','),
        "tsv" | "tab" => Ok(b'\t'),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Read a delimited file into a Polars DataFrame.
pub fn read_frame(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    check_file_size(path, options.max_file_size)?;
    validate_encoding(path)?;
    let delimiter = resolve_delimiter(path, options)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_rows)
        .with_parse_options(CsvParseOptions::default().with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_frame_shape(&df, path)?;
    Ok(df)
}

/// Reject frames with blank column names; warn when there is nothing to analyse.
pub fn validate_frame_shape(df: &DataFrame, path: &Path) -> Result<()> {
    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }
    if df.height() == 0 {
        warn!(path = %path.display(), "file has a header but no data rows");
    }
    Ok(())
}

/// Load a dataset with default options.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    load_dataset_with_options(path, &IngestOptions::default())
}

/// Load a dataset, resolving every column to numeric or categorical.
pub fn load_dataset_with_options(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    let start = Instant::now();
    debug!(path = %path.display(), "reading dataset");
    let df = read_frame(path, options)?;
    let dataset = dataset_from_frame(&df)?;
    info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        numeric = dataset.numeric_columns().count(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(dataset)
}
