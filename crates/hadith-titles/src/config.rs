//! Configuration for title reconciliation
//!
//! Covers how ambiguous matches are handled, which fields may be corrected,
//! near-miss suggestions and the column layout of spreadsheet exports.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalization::NormalizeOptions;

/// Reconciliation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// What to do when a sheet row matches several candidates
    pub ambiguity: AmbiguityPolicy,
    /// Fields the sheet is allowed to correct on matched candidates
    pub correct_fields: Vec<CorrectableField>,
    /// Normalization options applied to both sides
    pub normalization: NormalizeOptions,
    /// Near-miss suggestions for unmatched rows
    pub suggestions: SuggestionConfig,
    /// Spreadsheet export layout
    pub sheet: SheetLayout,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::default(),
            correct_fields: vec![CorrectableField::TitleEn, CorrectableField::AuthorEn],
            normalization: NormalizeOptions::default(),
            suggestions: SuggestionConfig::default(),
            sheet: SheetLayout::default(),
        }
    }
}

/// Handling of sheet rows whose title matches more than one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Report the row, propose no corrections
    #[default]
    Flag,
    /// Propose corrections against the first candidate in candidate order
    First,
    /// Fail the whole pass
    Reject,
}

/// Candidate fields a sheet row may correct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectableField {
    TitleEn,
    AuthorAr,
    AuthorEn,
}

impl CorrectableField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectableField::TitleEn => "title_en",
            CorrectableField::AuthorAr => "author_ar",
            CorrectableField::AuthorEn => "author_en",
        }
    }
}

impl std::fmt::Display for CorrectableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Near-miss suggestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub enabled: bool,
    /// Minimum Jaro-Winkler similarity of normalized titles (0.0 - 1.0)
    pub threshold: f64,
    /// Maximum suggestions per unmatched row
    pub max: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.85,
            max: 3,
        }
    }
}

/// Layout of a spreadsheet export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub delimiter: char,
    pub has_header: bool,
    pub columns: ColumnMap,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            columns: ColumnMap::default(),
        }
    }
}

/// Zero-based column positions of the record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub index: usize,
    pub title_ar: usize,
    pub title_en: usize,
    pub author_ar: usize,
    pub author_en: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            index: 0,
            title_ar: 1,
            title_en: 2,
            author_ar: 3,
            author_en: 4,
        }
    }
}

impl ColumnMap {
    fn as_array(&self) -> [usize; 5] {
        [
            self.index,
            self.title_ar,
            self.title_en,
            self.author_ar,
            self.author_en,
        ]
    }

    /// Number of columns a row needs to carry every field
    pub fn width(&self) -> usize {
        self.as_array().iter().max().map_or(0, |max| max + 1)
    }
}

impl ReconcileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.suggestions.threshold) {
            return Err(ConfigError::OutOfRange(
                "suggestions.threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.suggestions.enabled && self.suggestions.max == 0 {
            return Err(ConfigError::OutOfRange(
                "suggestions.max must be positive when suggestions are enabled".to_string(),
            ));
        }

        if !self.sheet.delimiter.is_ascii() {
            return Err(ConfigError::InvalidLayout(format!(
                "delimiter {:?} is not a single ASCII character",
                self.sheet.delimiter
            )));
        }

        let mut columns = self.sheet.columns.as_array();
        columns.sort_unstable();
        if columns.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(ConfigError::InvalidLayout(
                "sheet columns must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration {path}: {message}")]
    Read { path: String, message: String },
    /// Configuration text could not be parsed or serialized
    #[error("Parse error: {0}")]
    Parse(String),
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    /// Sheet layout is inconsistent
    #[error("Invalid sheet layout: {0}")]
    InvalidLayout(String),
}
