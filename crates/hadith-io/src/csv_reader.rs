//! CSV/TSV reader for spreadsheet exports

use std::fs::File;
use std::io::BufReader;

use hadith_titles::{SheetLayout, TitleRecord};

use crate::reader::{ensure_exists, IoError, IoResult, TitleSource};

/// Spreadsheet export reader
pub struct CsvTitleReader {
    path: String,
    layout: SheetLayout,
}

impl CsvTitleReader {
    /// Open a CSV file with the default layout
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_layout(path, SheetLayout::default())
    }

    /// Open a CSV file with an explicit layout
    pub fn open_with_layout(path: &str, layout: SheetLayout) -> IoResult<Self> {
        ensure_exists(path)?;

        if !layout.delimiter.is_ascii() {
            return Err(IoError::InvalidFormat(format!(
                "delimiter {:?} is not ASCII",
                layout.delimiter
            )));
        }

        Ok(Self {
            path: path.to_string(),
            layout,
        })
    }

    fn reader(&self) -> IoResult<csv::Reader<BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.layout.delimiter as u8)
            .has_headers(self.layout.has_header)
            .flexible(true)
            .from_reader(BufReader::new(file)))
    }
}

impl TitleSource for CsvTitleReader {
    fn read_records(&self) -> IoResult<Vec<TitleRecord>> {
        let mut reader = self.reader()?;
        let mut records = Vec::new();
        let mut skipped = 0;

        for result in reader.records() {
            let row = result.map_err(|e| IoError::InvalidFormat(e.to_string()))?;
            match parse_row(&row, &self.layout) {
                Some(record) => records.push(record),
                None => {
                    tracing::debug!(
                        "Skipping line {} of {}: blank index",
                        file_line(&row),
                        self.path
                    );
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::info!("Skipped {} rows without an index in {}", skipped, self.path);
        }

        Ok(records)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn format_name(&self) -> &'static str {
        if self.layout.delimiter == '\t' {
            "TSV"
        } else {
            "CSV"
        }
    }
}

/// 1-based line of the row in the source file, header included
fn file_line(row: &csv::StringRecord) -> u64 {
    row.position().map_or(0, |position| position.line())
}

/// Build a record from one row; `None` when the index cell is missing or blank
fn parse_row(row: &csv::StringRecord, layout: &SheetLayout) -> Option<TitleRecord> {
    let columns = &layout.columns;
    let cell = |position: usize| {
        row.get(position)
            .map(|value| value.trim_start_matches('\u{feff}').trim())
            .unwrap_or("")
    };

    let index = cell(columns.index);
    if index.is_empty() {
        return None;
    }

    let title_ar = cell(columns.title_ar);

    Some(TitleRecord {
        index: index.to_string(),
        title_ar: (!title_ar.is_empty()).then(|| title_ar.to_string()),
        title_en: cell(columns.title_en).to_string(),
        author_ar: cell(columns.author_ar).to_string(),
        author_en: cell(columns.author_en).to_string(),
    })
}
