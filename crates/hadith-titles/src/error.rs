//! Error types for hadith-titles

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for title operations
pub type Result<T> = std::result::Result<T, TitleError>;

/// Main error type for title matching and reconciliation
#[derive(Error, Debug)]
pub enum TitleError {
    /// Candidate collection is not a well-formed sequence of records
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A sheet row matched several candidates under the reject policy
    #[error("Ambiguous match for sheet row {row} ({index}): {count} candidates share the title")]
    Ambiguous {
        row: usize,
        index: String,
        count: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<serde_json::Error> for TitleError {
    fn from(err: serde_json::Error) -> Self {
        TitleError::InvalidInput(err.to_string())
    }
}
