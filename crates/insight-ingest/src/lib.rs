//! Dataset ingestion: delimited-text loading and column type resolution.

pub mod convert;
pub mod error;
pub mod reader;

pub use convert::{dataset_from_frame, is_numeric_dtype};
pub use error::{IngestError, Result};
pub use reader::{
    DEFAULT_INFER_SCHEMA_ROWS, IngestOptions, MAX_FILE_SIZE, check_file_size, load_dataset,
    load_dataset_with_options, read_frame, resolve_delimiter, validate_encoding,
    validate_frame_shape,
};
