//! Title record representation

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, TitleError};
use crate::normalization::{normalize, NormalizedKey};

/// One book title pair with its authors
///
/// Sourced wholesale from a spreadsheet export or a database export and
/// held read-only for the duration of a matching session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    /// External identifier
    #[serde(default, deserialize_with = "string_or_number")]
    pub index: String,
    /// Arabic/Persian title, possibly with diacritics; `None` when the row has none
    #[serde(default, alias = "title_ar")]
    pub title_ar: Option<String>,
    #[serde(default, alias = "title_en", deserialize_with = "null_as_empty")]
    pub title_en: String,
    #[serde(default, alias = "author_ar", deserialize_with = "null_as_empty")]
    pub author_ar: String,
    #[serde(default, alias = "author_en", deserialize_with = "null_as_empty")]
    pub author_en: String,
}

impl TitleRecord {
    /// Create a record with an index and Arabic title
    pub fn new(index: impl Into<String>, title_ar: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            title_ar: Some(title_ar.into()),
            ..Default::default()
        }
    }

    /// Builder method to add the English title
    pub fn with_title_en(mut self, title_en: impl Into<String>) -> Self {
        self.title_en = title_en.into();
        self
    }

    /// Builder method to add the Arabic author
    pub fn with_author_ar(mut self, author_ar: impl Into<String>) -> Self {
        self.author_ar = author_ar.into();
        self
    }

    /// Builder method to add the English author
    pub fn with_author_en(mut self, author_en: impl Into<String>) -> Self {
        self.author_en = author_en.into();
        self
    }

    /// Arabic title, or the empty string when absent
    pub fn title_ar_or_empty(&self) -> &str {
        self.title_ar.as_deref().unwrap_or("")
    }

    /// Normalized form of the Arabic title
    pub fn normalized_title(&self) -> String {
        normalize(self.title_ar.as_deref())
    }

    /// Comparison key of the Arabic title
    pub fn key(&self) -> NormalizedKey {
        NormalizedKey::new(self.title_ar.as_deref())
    }

    /// Parse a candidate collection from a JSON value
    ///
    /// The value must be an array of objects. Individual records may lack
    /// any field, including `titleAr`; a structurally wrong collection is
    /// rejected with [`TitleError::InvalidInput`].
    pub fn from_json_value(value: &Value) -> Result<Vec<TitleRecord>> {
        let items = value.as_array().ok_or_else(|| {
            TitleError::InvalidInput(format!(
                "expected an array of records, found {}",
                json_kind(value)
            ))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                if !item.is_object() {
                    return Err(TitleError::InvalidInput(format!(
                        "record {} is {}, expected an object",
                        position,
                        json_kind(item)
                    )));
                }
                TitleRecord::deserialize(item).map_err(|e| {
                    TitleError::InvalidInput(format!("record {}: {}", position, e))
                })
            })
            .collect()
    }

    /// Parse a candidate collection from JSON text
    pub fn from_json_str(json: &str) -> Result<Vec<TitleRecord>> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Database exports carry numeric ids; spreadsheet exports carry text
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Index {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Index>::deserialize(deserializer)? {
        Some(Index::Text(s)) => s,
        Some(Index::Number(n)) => n.to_string(),
        None => String::new(),
    })
}
