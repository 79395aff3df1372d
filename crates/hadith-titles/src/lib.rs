//! hadith-titles: title reconciliation core for Hadith Hub
//!
//! This library provides pure Rust implementations of:
//! - Arabic/Persian title normalization (diacritics, letter variants, punctuation)
//! - Exact title matching over candidate records
//! - A reusable title index with duplicate detection
//! - Reconciliation of a spreadsheet naming list against stored book rows
//!
//! Nothing in this crate performs I/O. Loading records from files lives in
//! `hadith-io`; the `hadith-reconcile` binary wires both together.

pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod normalization;
pub mod reconcile;
pub mod record;

pub use config::{
    AmbiguityPolicy, ColumnMap, ConfigError, CorrectableField, ReconcileConfig, SheetLayout,
    SuggestionConfig,
};
pub use error::{Result, TitleError};
pub use index::{DuplicateGroup, TitleIndex};
pub use matcher::{find_match_positions, find_matches};
pub use normalization::{normalize, normalize_with, NormalizeOptions, NormalizedKey};
pub use reconcile::{
    reconcile, FieldCorrection, MatchOutcome, ReconcileReport, ReconcileSummary, RowReport,
    Suggestion,
};
pub use record::TitleRecord;

/// Returns the version of hadith-titles
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
