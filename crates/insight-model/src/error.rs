use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("column name must not be empty")]
    EmptyColumnName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
