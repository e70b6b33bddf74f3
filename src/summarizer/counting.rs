//! Category counts and rankings.

use super::columns::Field;
use super::dataset::Record;
use super::normalize::{NormalizationTable, is_empty_label, normalize_text};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub count: u64,
}

/// Label to occurrence count. Entries iterate in first-seen order, which is
/// also the tie-break for rankings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCount {
    entries: Vec<CategoryEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CategoryCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = Self::new();
        for label in labels {
            counts.add(label);
        }
        counts
    }

    pub fn add(&mut self, label: impl Into<String>) {
        let label = label.into();
        if let Some(entry) = self
            .index
            .get(&label)
            .and_then(|&i| self.entries.get_mut(i))
        {
            entry.count += 1;
            return;
        }

        self.index.insert(label.clone(), self.entries.len());
        self.entries.push(CategoryEntry { label, count: 1 });
    }

    pub fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .and_then(|&i| self.entries.get(i))
            .map_or(0, |e| e.count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter()
    }

    /// Non-empty labels by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<CategoryEntry> {
        let mut ranked: Vec<CategoryEntry> = self
            .entries
            .iter()
            .filter(|e| !is_empty_label(&e.label))
            .cloned()
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    pub fn top_n(&self, n: usize) -> Vec<CategoryEntry> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Counts the normalized labels of a field. Numeric fields are labelled by
/// their parsed value, so `"21.0"` and `"21"` share the label `"21"`.
pub fn count_by_category(
    records: &[Record],
    field: Field,
    table: &NormalizationTable,
) -> CategoryCount {
    CategoryCount::from_labels(records.iter().map(|r| {
        if field.is_text() {
            normalize_text(r.text(field), table)
        } else {
            let value = r.number(field).map(|v| v.to_string());
            normalize_text(value.as_deref(), table)
        }
    }))
}

/// The `n` most frequent non-empty labels of a text field.
pub fn top_n(
    records: &[Record],
    field: Field,
    table: &NormalizationTable,
    n: usize,
) -> Vec<CategoryEntry> {
    count_by_category(records, field, table).top_n(n)
}
