//! Reconciliation of a spreadsheet naming list against stored rows
//!
//! Every sheet row is looked up by normalized Arabic title and classified
//! as missing, unique or ambiguous. Unique matches yield proposed field
//! corrections; missing rows yield near-miss suggestions ranked by
//! Jaro-Winkler similarity of normalized titles.

use serde::Serialize;
use strsim::jaro_winkler;

use crate::config::{AmbiguityPolicy, CorrectableField, ReconcileConfig, SuggestionConfig};
use crate::error::{Result, TitleError};
use crate::index::{DuplicateGroup, TitleIndex};
use crate::normalization::NormalizedKey;
use crate::record::TitleRecord;

/// How a sheet row relates to the candidates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// No candidate shares the title
    Missing { suggestions: Vec<Suggestion> },
    /// Exactly one candidate shares the title
    Unique { candidate: usize },
    /// Several candidates share the title (duplicate source data)
    Ambiguous { candidates: Vec<usize> },
}

impl MatchOutcome {
    pub fn is_missing(&self) -> bool {
        matches!(self, MatchOutcome::Missing { .. })
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, MatchOutcome::Unique { .. })
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, MatchOutcome::Ambiguous { .. })
    }

    /// Candidate positions the row matched
    pub fn candidates(&self) -> Vec<usize> {
        match self {
            MatchOutcome::Missing { .. } => vec![],
            MatchOutcome::Unique { candidate } => vec![*candidate],
            MatchOutcome::Ambiguous { candidates } => candidates.clone(),
        }
    }
}

/// A near-miss candidate for an unmatched row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Position of the first candidate holding the suggested title
    pub candidate: usize,
    pub key: NormalizedKey,
    /// Similarity score (0.0 to 1.0)
    pub score: f64,
}

/// A proposed update of one candidate field from the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCorrection {
    /// Position of the candidate in the candidate list
    pub candidate: usize,
    /// External identifier of the candidate
    pub candidate_index: String,
    /// External identifier of the sheet row proposing the value
    pub record_index: String,
    pub field: CorrectableField,
    pub current: String,
    pub proposed: String,
}

/// Result for one sheet row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    /// Position of the row in the sheet
    pub row: usize,
    pub record: TitleRecord,
    pub key: NormalizedKey,
    pub outcome: MatchOutcome,
    pub corrections: Vec<FieldCorrection>,
}

/// Counts over a whole pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub rows: usize,
    pub unique: usize,
    pub ambiguous: usize,
    pub missing: usize,
    pub corrections: usize,
}

/// Result of reconciling a sheet against candidates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub rows: Vec<RowReport>,
    pub summary: ReconcileSummary,
    /// Candidates sharing a title among themselves
    pub duplicates: Vec<DuplicateGroup>,
}

/// Reconcile sheet rows against candidate rows
///
/// Fails only under [`AmbiguityPolicy::Reject`] when a row matches more
/// than one candidate.
pub fn reconcile(
    sheet: &[TitleRecord],
    candidates: &[TitleRecord],
    config: &ReconcileConfig,
) -> Result<ReconcileReport> {
    tracing::info!(
        "Reconciling {} sheet rows against {} candidates",
        sheet.len(),
        candidates.len()
    );

    let index = TitleIndex::build_with(candidates, config.normalization);
    let mut rows = Vec::with_capacity(sheet.len());
    let mut summary = ReconcileSummary {
        rows: sheet.len(),
        ..Default::default()
    };

    for (row, record) in sheet.iter().enumerate() {
        let key = NormalizedKey::with_options(record.title_ar.as_deref(), index.options());
        let positions: &[usize] = if key.is_empty() {
            &[]
        } else {
            index.positions_for_key(&key)
        };

        let (outcome, corrections) = match positions {
            [] => {
                summary.missing += 1;
                let suggestions = if key.is_empty() || !config.suggestions.enabled {
                    vec![]
                } else {
                    suggest(&key, &index, &config.suggestions)
                };
                tracing::debug!(
                    "Row {} ({}): no match, {} suggestions",
                    row,
                    record.index,
                    suggestions.len()
                );
                (MatchOutcome::Missing { suggestions }, vec![])
            }
            [candidate] => {
                summary.unique += 1;
                tracing::debug!("Row {} ({}): matched candidate {}", row, record.index, candidate);
                let corrections =
                    propose_corrections(record, *candidate, candidates, &config.correct_fields);
                (
                    MatchOutcome::Unique {
                        candidate: *candidate,
                    },
                    corrections,
                )
            }
            many => {
                tracing::warn!(
                    "Row {} ({}): {} candidates share the title {}",
                    row,
                    record.index,
                    many.len(),
                    key
                );
                let corrections = match config.ambiguity {
                    AmbiguityPolicy::Reject => {
                        return Err(TitleError::Ambiguous {
                            row,
                            index: record.index.clone(),
                            count: many.len(),
                        });
                    }
                    AmbiguityPolicy::Flag => vec![],
                    AmbiguityPolicy::First => {
                        propose_corrections(record, many[0], candidates, &config.correct_fields)
                    }
                };
                summary.ambiguous += 1;
                (
                    MatchOutcome::Ambiguous {
                        candidates: many.to_vec(),
                    },
                    corrections,
                )
            }
        };

        summary.corrections += corrections.len();
        rows.push(RowReport {
            row,
            record: record.clone(),
            key,
            outcome,
            corrections,
        });
    }

    let duplicates = index.duplicate_groups();

    tracing::info!(
        "Reconciled {} rows: {} unique, {} ambiguous, {} missing, {} corrections",
        summary.rows,
        summary.unique,
        summary.ambiguous,
        summary.missing,
        summary.corrections
    );

    Ok(ReconcileReport {
        rows,
        summary,
        duplicates,
    })
}

/// Rank distinct candidate titles by similarity to `key`
fn suggest(
    key: &NormalizedKey,
    index: &TitleIndex<'_>,
    config: &SuggestionConfig,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = index
        .keys()
        .filter(|candidate_key| !candidate_key.is_empty())
        .filter_map(|candidate_key| {
            let score = jaro_winkler(key.as_str(), candidate_key.as_str());
            if score < config.threshold {
                return None;
            }
            let candidate = *index.positions_for_key(candidate_key).first()?;
            Some(Suggestion {
                candidate,
                key: candidate_key.clone(),
                score,
            })
        })
        .collect();

    // Stable sort keeps candidate order among equal scores
    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(config.max);
    suggestions
}

fn propose_corrections(
    sheet_row: &TitleRecord,
    candidate: usize,
    candidates: &[TitleRecord],
    fields: &[CorrectableField],
) -> Vec<FieldCorrection> {
    let stored = &candidates[candidate];

    fields
        .iter()
        .filter_map(|&field| {
            let proposed = field_value(sheet_row, field).trim();
            let current = field_value(stored, field).trim();
            if proposed.is_empty() || proposed == current {
                return None;
            }
            Some(FieldCorrection {
                candidate,
                candidate_index: stored.index.clone(),
                record_index: sheet_row.index.clone(),
                field,
                current: current.to_string(),
                proposed: proposed.to_string(),
            })
        })
        .collect()
}

fn field_value(record: &TitleRecord, field: CorrectableField) -> &str {
    match field {
        CorrectableField::TitleEn => &record.title_en,
        CorrectableField::AuthorAr => &record.author_ar,
        CorrectableField::AuthorEn => &record.author_en,
    }
}
