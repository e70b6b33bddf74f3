//! Text normalization for free-text category cells.
//!
//! Every categorical view goes through the same cleaning step before it is
//! compared or counted: control characters are dropped, runs of whitespace are
//! collapsed, surrounding whitespace is trimmed and the text is lowercased.
//! Blank cells and spreadsheet null tokens (`N/A`, `nan`, ...) become
//! [`EMPTY_LABEL`].
//!
//! A [`NormalizationTable`] then maps the cleaned key to a display label. Keys
//! that are not in the table follow the table's [`UnmatchedPolicy`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label used for missing, blank or unparseable values.
pub const EMPTY_LABEL: &str = "vazio";

/// Cell contents treated as missing, compared after cleaning.
const NULL_TOKENS: &[&str] = &["null", "n/a", "na", "nan", "none", "-"];

/// What a table does with a cleaned value it has no synonym for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Fold into the empty label, the same bucket as missing values.
    #[default]
    Empty,
    /// Keep the cleaned (lowercased) text as the label.
    Passthrough,
    /// Use a dedicated label, keeping unrecognized values apart from missing ones.
    Label(String),
}

/// Synonym table mapping cleaned keys to canonical display labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationTable {
    pub synonyms: BTreeMap<String, String>,
    pub unmatched: UnmatchedPolicy,
}

impl NormalizationTable {
    pub fn new(unmatched: UnmatchedPolicy) -> Self {
        Self {
            synonyms: BTreeMap::new(),
            unmatched,
        }
    }

    /// A table with no synonyms that keeps every cleaned value as its own label.
    pub fn passthrough() -> Self {
        Self::new(UnmatchedPolicy::Passthrough)
    }

    /// Adds a synonym. The key is cleaned so `"  FEMININO"` and `"feminino"`
    /// register the same entry.
    pub fn with_synonym(mut self, key: &str, label: impl Into<String>) -> Self {
        if let Some(key) = clean_text(key) {
            self.synonyms.insert(key, label.into());
        }
        self
    }

    /// Canonical labels this table can produce, besides the empty label and
    /// passthrough values.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        let extra = match &self.unmatched {
            UnmatchedPolicy::Label(label) => Some(label.as_str()),
            UnmatchedPolicy::Empty | UnmatchedPolicy::Passthrough => None,
        };
        self.synonyms.values().map(String::as_str).chain(extra)
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        if let Some(label) = self.synonyms.get(key) {
            return Some(label);
        }
        // Tables read from JSON may carry keys that were never cleaned.
        self.synonyms
            .iter()
            .find(|(raw, _)| clean_text(raw).as_deref() == Some(key))
            .map(|(_, label)| label.as_str())
    }
}

/// Cleans a raw cell into a comparison key.
///
/// Returns `None` for missing, blank and null-token values.
pub fn clean_text(value: &str) -> Option<String> {
    let visible: String = value
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    let collapsed = visible.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    let key = collapsed.to_lowercase();
    if NULL_TOKENS.contains(&key.as_str()) {
        None
    } else {
        Some(key)
    }
}

/// Normalizes a cell to its display label. Never fails.
pub fn normalize_text(value: Option<&str>, table: &NormalizationTable) -> String {
    let Some(key) = value.and_then(clean_text) else {
        return EMPTY_LABEL.to_owned();
    };

    if let Some(label) = table.lookup(&key) {
        return label.to_owned();
    }

    match &table.unmatched {
        UnmatchedPolicy::Empty => EMPTY_LABEL.to_owned(),
        UnmatchedPolicy::Passthrough => key,
        UnmatchedPolicy::Label(label) => label.clone(),
    }
}

pub fn is_empty_label(label: &str) -> bool {
    label == EMPTY_LABEL
}

/// Gender vocabulary: only the two spellings the source data uses are known.
pub fn default_gender_table() -> NormalizationTable {
    NormalizationTable::new(UnmatchedPolicy::Empty)
        .with_synonym("feminino", "Feminino")
        .with_synonym("masculino", "Masculino")
}

/// Agreement types keep their lowercase spelling as the label.
pub fn default_agreement_table() -> NormalizationTable {
    NormalizationTable::passthrough()
        .with_synonym("agente de integração", "agente de integração")
        .with_synonym("concedente", "concedente")
        .with_synonym("unidade da ufpe", "unidade da ufpe")
}
