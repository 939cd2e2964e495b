use thiserror::Error;

/// Result type for language resource operations
pub type Result<T> = std::result::Result<T, LanguageError>;

/// Errors raised while loading language resources
#[derive(Error, Debug)]
pub enum LanguageError {
    /// A dictionary line could not be parsed
    #[error("Invalid dictionary entry at line {line}: {reason}")]
    InvalidDictionary { line: usize, reason: String },

    /// Dictionary file could not be read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LanguageError {
    /// Create an invalid dictionary error
    pub fn invalid_dictionary(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDictionary {
            line,
            reason: reason.into(),
        }
    }
}
