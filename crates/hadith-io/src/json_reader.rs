//! JSON reader for database exports
//!
//! Expects a top-level array of row objects with `index`, `titleAr`,
//! `titleEn`, `authorAr` and `authorEn` fields (snake_case also accepted).

use std::fs::File;
use std::io::BufReader;

use hadith_titles::TitleRecord;
use serde_json::Value;

use crate::reader::{ensure_exists, IoError, IoResult, TitleSource};

/// JSON export reader
pub struct JsonTitleReader {
    path: String,
}

impl JsonTitleReader {
    /// Open a JSON export
    pub fn open(path: &str) -> IoResult<Self> {
        ensure_exists(path)?;
        Ok(Self {
            path: path.to_string(),
        })
    }
}

impl TitleSource for JsonTitleReader {
    fn read_records(&self) -> IoResult<Vec<TitleRecord>> {
        let file = File::open(&self.path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| IoError::InvalidFormat(format!("{}: {}", self.path, e)))?;

        let records = TitleRecord::from_json_value(&value)
            .map_err(|e| IoError::invalid_input(&self.path, e))?;

        let untitled = records.iter().filter(|r| r.title_ar.is_none()).count();
        if untitled > 0 {
            tracing::warn!("{} records in {} have no Arabic title", untitled, self.path);
        }

        Ok(records)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}
