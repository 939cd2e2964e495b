use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors raised while loading a document table
///
/// The `Display` form of each variant is shown to end users as is.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The configured source does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The table has no column holding document text
    #[error("The CSV file must contain a '{column}' column.")]
    MissingColumn { column: String },

    /// No source has been configured yet
    #[error("No corpus loaded.")]
    NotLoaded,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CorpusError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}
