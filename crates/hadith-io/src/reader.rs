//! Title source trait and common types
//!
//! The `TitleSource` trait provides a uniform interface for loading
//! `TitleRecord`s from the supported export formats.

use std::path::Path;

use hadith_titles::{SheetLayout, TitleError, TitleRecord};
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid input in {path}: {message}")]
    InvalidInput { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err.to_string())
    }
}

impl IoError {
    pub(crate) fn invalid_input(path: &str, err: TitleError) -> Self {
        let message = match err {
            TitleError::InvalidInput(message) => message,
            other => other.to_string(),
        };
        IoError::InvalidInput {
            path: path.to_string(),
            message,
        }
    }
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for loading title records from an export
pub trait TitleSource: Send + Sync {
    /// Read every record, in file order
    fn read_records(&self) -> IoResult<Vec<TitleRecord>>;

    /// Get the file path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed source for dynamic dispatch
pub type BoxedSource = Box<dyn TitleSource>;

pub(crate) fn ensure_exists(path: &str) -> IoResult<()> {
    if !Path::new(path).exists() {
        return Err(IoError::FileNotFound(path.to_string()));
    }
    Ok(())
}

/// Open a file and return an appropriate source
///
/// The format is auto-detected from the file extension. `layout` applies
/// to tabular formats; `.tsv` files always use a tab delimiter.
pub fn open_source(path: &str, layout: &SheetLayout) -> IoResult<BoxedSource> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" => {
            use crate::csv_reader::CsvTitleReader;
            Ok(Box::new(CsvTitleReader::open_with_layout(path, layout.clone())?))
        }

        #[cfg(feature = "csv")]
        "tsv" => {
            use crate::csv_reader::CsvTitleReader;
            let layout = SheetLayout {
                delimiter: '\t',
                ..layout.clone()
            };
            Ok(Box::new(CsvTitleReader::open_with_layout(path, layout)?))
        }

        "json" => {
            use crate::json_reader::JsonTitleReader;
            Ok(Box::new(JsonTitleReader::open(path)?))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

/// Open a file and read all of its records
pub fn load_records(path: &str, layout: &SheetLayout) -> IoResult<Vec<TitleRecord>> {
    let source = open_source(path, layout)?;
    let records = source.read_records()?;
    tracing::info!(
        "Loaded {} records from {} ({})",
        records.len(),
        path,
        source.format_name()
    );
    Ok(records)
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = Vec::new();

    #[cfg(feature = "csv")]
    {
        extensions.push("csv");
        extensions.push("tsv");
    }

    extensions.push("json");

    extensions
}
