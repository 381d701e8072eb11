use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Failed to parse CSV: {0}")]
    ParseFailure(String),

    #[error("CSV file is empty")]
    EmptySource,

    #[error("No table loaded")]
    NoTableLoaded,

    #[error("Missing column selection: {0}")]
    MissingSelection(String),

    #[error("Latitude and longitude must be different columns (both set to '{column}')")]
    DuplicateSelection { column: String },

    #[error("Column '{column}' does not exist in the loaded table")]
    UnknownColumn { column: String },

    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    #[error("No converted data to export")]
    NoResultToExport,
}
