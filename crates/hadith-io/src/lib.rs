//! hadith-io - Loading title records from exports
//!
//! This crate provides readers for the two sides of a reconciliation:
//!
//! - **CSV/TSV**: spreadsheet exports of the external naming list
//! - **JSON**: exports of the stored book rows
//!
//! # Design
//!
//! All readers implement the `TitleSource` trait. A file is opened, read
//! completely and closed within a single `read_records` call.

pub mod json_reader;
pub mod reader;

#[cfg(feature = "csv")]
pub mod csv_reader;

pub use reader::*;
