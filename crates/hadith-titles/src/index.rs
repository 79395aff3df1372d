//! Title index for repeated lookups
//!
//! Building the index normalizes every candidate once; lookups then cost a
//! single normalization of the query. Results are identical, in content and
//! order, to [`crate::matcher::find_matches`] under the same options.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::normalization::{NormalizeOptions, NormalizedKey};
use crate::record::TitleRecord;

/// Candidates sharing one normalized title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub key: NormalizedKey,
    /// Positions into the indexed candidates, ascending
    pub positions: Vec<usize>,
}

/// Map from normalized title to candidate positions
#[derive(Debug, Clone)]
pub struct TitleIndex<'a> {
    records: &'a [TitleRecord],
    keys: Vec<NormalizedKey>,
    positions: HashMap<NormalizedKey, Vec<usize>>,
    options: NormalizeOptions,
}

impl<'a> TitleIndex<'a> {
    /// Index candidates with default normalization
    pub fn build(records: &'a [TitleRecord]) -> Self {
        Self::build_with(records, NormalizeOptions::default())
    }

    /// Index candidates with explicit normalization options
    pub fn build_with(records: &'a [TitleRecord], options: NormalizeOptions) -> Self {
        let keys: Vec<NormalizedKey> = records
            .iter()
            .map(|record| NormalizedKey::with_options(record.title_ar.as_deref(), &options))
            .collect();

        let mut positions: HashMap<NormalizedKey, Vec<usize>> = HashMap::new();
        for (position, key) in keys.iter().enumerate() {
            positions.entry(key.clone()).or_default().push(position);
        }

        tracing::debug!(
            "Indexed {} candidates under {} distinct titles",
            records.len(),
            positions.len()
        );

        Self {
            records,
            keys,
            positions,
            options,
        }
    }

    /// Normalization options the index was built with
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Compute a query key the same way candidates were keyed
    pub fn key_for(&self, query: &str) -> NormalizedKey {
        NormalizedKey::with_options(query, &self.options)
    }

    /// Positions of candidates matching `query`, ascending
    pub fn positions(&self, query: &str) -> &[usize] {
        self.positions_for_key(&self.key_for(query))
    }

    /// Positions of candidates holding `key`, ascending
    pub fn positions_for_key(&self, key: &NormalizedKey) -> &[usize] {
        self.positions.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidates matching `query`, in candidate order
    pub fn lookup(&self, query: &str) -> Vec<&'a TitleRecord> {
        let records = self.records;
        self.positions(query)
            .iter()
            .map(|&position| &records[position])
            .collect()
    }

    /// Keys shared by more than one candidate, in order of first appearance
    ///
    /// The empty key (candidates without an Arabic title) is not reported.
    pub fn duplicate_groups(&self) -> Vec<DuplicateGroup> {
        let mut seen: HashSet<&NormalizedKey> = HashSet::new();
        let mut groups = Vec::new();

        for key in &self.keys {
            if key.is_empty() || !seen.insert(key) {
                continue;
            }
            let positions = self.positions_for_key(key);
            if positions.len() > 1 {
                groups.push(DuplicateGroup {
                    key: key.clone(),
                    positions: positions.to_vec(),
                });
            }
        }

        groups
    }

    /// Distinct keys in order of first appearance
    pub fn keys(&self) -> impl Iterator<Item = &NormalizedKey> + '_ {
        let mut seen: HashSet<&NormalizedKey> = HashSet::new();
        self.keys.iter().filter(move |key| seen.insert(*key))
    }

    /// Key of the candidate at `position`
    pub fn key_at(&self, position: usize) -> Option<&NormalizedKey> {
        self.keys.get(position)
    }

    pub fn records(&self) -> &'a [TitleRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
