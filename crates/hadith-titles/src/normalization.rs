//! Text normalization for title comparison
//!
//! Spreadsheet exports and database rows disagree on diacritics, letter
//! variants and punctuation. Every title is reduced to a [`NormalizedKey`]
//! by a fixed, ordered list of rewrite rules; two titles are "the same"
//! exactly when their keys are equal.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Rewrite rules applied in order. Later rules assume earlier ones ran.
    static ref RULES: Vec<(Regex, &'static str)> = vec![
        // Harakat, tanwin, shadda, sukun, small high marks, superscript alef
        (Regex::new(r"[\x{064B}-\x{065F}\x{0670}]").unwrap(), ""),
        // Alef with hamza above/below, alef with madda, bare hamza
        (Regex::new(r"[أإآء]").unwrap(), "ا"),
        // Alef maksura
        (Regex::new(r"ى").unwrap(), "ي"),
        // Ta marbuta
        (Regex::new(r"ة").unwrap(), "ه"),
        // Tatweel
        (Regex::new(r"ـ").unwrap(), ""),
        // Persian/Urdu kaf
        (Regex::new(r"ک").unwrap(), "ك"),
        // Persian/Urdu yeh
        (Regex::new(r"ی").unwrap(), "ي"),
        // Whitespace and punctuation
        (
            Regex::new(r#"[\s()\[\]/\\,،.۔:؛«»"'“”‘’]"#).unwrap(),
            "",
        ),
    ];
}

/// Options for [`normalize_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Apply Unicode NFKC before the rewrite rules, folding Arabic
    /// presentation forms (U+FB50..U+FDFF, U+FE70..U+FEFF) to base letters
    pub fold_presentation_forms: bool,
}

/// Normalize a title for comparison
///
/// - Returns an empty string for absent or empty input
/// - Strips Arabic diacritics (U+064B..U+065F, U+0670)
/// - Folds alef variants, alef maksura, ta marbuta
/// - Removes tatweel
/// - Folds Persian kaf and yeh to their Arabic forms
/// - Removes whitespace and punctuation
/// - Lowercases residual Latin text
///
/// The function is total and idempotent.
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(text) if !text.is_empty() => apply_rules(text),
        _ => String::new(),
    }
}

/// Normalize a title with explicit options
pub fn normalize_with<'a>(text: impl Into<Option<&'a str>>, options: &NormalizeOptions) -> String {
    match text.into() {
        Some(text) if !text.is_empty() => {
            if options.fold_presentation_forms {
                let folded: String = text.nfkc().collect();
                apply_rules(&folded)
            } else {
                apply_rules(text)
            }
        }
        _ => String::new(),
    }
}

fn apply_rules(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in RULES.iter() {
        if pattern.is_match(&result) {
            result = pattern.replace_all(&result, *replacement).into_owned();
        }
    }
    result.to_lowercase().trim().to_string()
}

/// Canonical comparison key for a title
///
/// Derived on demand and never stored alongside a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Compute the key of a title with default options
    pub fn new<'a>(text: impl Into<Option<&'a str>>) -> Self {
        Self(normalize(text))
    }

    /// Compute the key of a title with explicit options
    pub fn with_options<'a>(text: impl Into<Option<&'a str>>, options: &NormalizeOptions) -> Self {
        Self(normalize_with(text, options))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
