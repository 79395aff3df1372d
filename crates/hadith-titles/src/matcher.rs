//! Linear title matching
//!
//! A record matches a query when the normalized Arabic title equals the
//! normalized query. Records without an Arabic title normalize to the empty
//! string and stay in the scan.

use crate::normalization::normalize;
use crate::record::TitleRecord;

/// Find every candidate whose title is the same as `query`
///
/// Results keep the relative order of `candidates`. Zero matches is a valid
/// outcome; several matches mean the source data holds duplicates and are
/// all returned.
pub fn find_matches<'a>(query: &str, candidates: &'a [TitleRecord]) -> Vec<&'a TitleRecord> {
    let key = normalize(query);
    candidates
        .iter()
        .filter(|record| record.normalized_title() == key)
        .collect()
}

/// Like [`find_matches`], returning positions into `candidates`
pub fn find_match_positions(query: &str, candidates: &[TitleRecord]) -> Vec<usize> {
    let key = normalize(query);
    candidates
        .iter()
        .enumerate()
        .filter(|(_, record)| record.normalized_title() == key)
        .map(|(position, _)| position)
        .collect()
}
