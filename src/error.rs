use thiserror::Error;

pub type Result<T> = std::result::Result<T, HlaviError>;

#[derive(Debug, Error)]
pub enum HlaviError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Duplicate column ID: {0}")]
    DuplicateColumnId(String),

    #[error("Duplicate row ID: {0}")]
    DuplicateRowId(String),

    #[error("Invalid board ID: {0}")]
    InvalidId(String),

    #[error("Data source error: {0}")]
    SourceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}
