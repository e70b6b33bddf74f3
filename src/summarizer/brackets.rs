//! Age brackets.
//!
//! A [`BracketTable`] is an ordered list of half-open ranges `[lower, upper)`
//! starting at zero, each one beginning where the previous ends, with only the
//! last range left open. Construction rejects anything else, so a valid table
//! maps every non-negative age to exactly one bracket.

use crate::error::{Result, SummaryError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBracket {
    pub label: String,
    pub lower: i64,
    /// Exclusive upper bound; `None` for the open-ended last bracket.
    pub upper: Option<i64>,
}

impl AgeBracket {
    pub fn new(label: impl Into<String>, lower: i64, upper: Option<i64>) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    pub fn contains(&self, age: i64) -> bool {
        age >= self.lower && self.upper.is_none_or(|upper| age < upper)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<AgeBracket>,
}

impl BracketTable {
    pub fn new(brackets: Vec<AgeBracket>) -> Result<Self> {
        let Some(first) = brackets.first() else {
            return Err(SummaryError::InvalidBrackets(
                "at least one bracket is required".to_owned(),
            ));
        };
        if first.lower != 0 {
            return Err(SummaryError::InvalidBrackets(format!(
                "first bracket '{}' must start at 0, not {}",
                first.label, first.lower
            )));
        }

        let mut seen = HashSet::new();
        let last_index = brackets.len() - 1;
        for (i, bracket) in brackets.iter().enumerate() {
            if !seen.insert(bracket.label.as_str()) {
                return Err(SummaryError::InvalidBrackets(format!(
                    "duplicate label '{}'",
                    bracket.label
                )));
            }

            match (bracket.upper, i == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(SummaryError::InvalidBrackets(format!(
                        "only the last bracket may be open-ended, '{}' is not last",
                        bracket.label
                    )));
                }
                (Some(upper), true) => {
                    return Err(SummaryError::InvalidBrackets(format!(
                        "last bracket '{}' must be open-ended, found upper bound {upper}",
                        bracket.label
                    )));
                }
                (Some(upper), false) => {
                    if upper <= bracket.lower {
                        return Err(SummaryError::InvalidBrackets(format!(
                            "bracket '{}' is empty: [{}, {upper})",
                            bracket.label, bracket.lower
                        )));
                    }
                    let next_lower = brackets.get(i + 1).map(|next| next.lower);
                    if next_lower != Some(upper) {
                        return Err(SummaryError::InvalidBrackets(format!(
                            "bracket '{}' ends at {upper} but the next starts at {}",
                            bracket.label,
                            next_lower.unwrap_or_default()
                        )));
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[AgeBracket] {
        &self.brackets
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.brackets.iter().map(|b| b.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Position of the bracket containing `age`.
    pub fn index_of(&self, age: i64) -> Result<usize> {
        self.brackets
            .iter()
            .position(|b| b.contains(age))
            .ok_or(SummaryError::UncoveredAge { age })
    }
}

/// Returns the label of the bracket containing `age`.
pub fn bucket_age(age: i64, table: &BracketTable) -> Result<&str> {
    let index = table.index_of(age)?;
    table
        .brackets
        .get(index)
        .map(|b| b.label.as_str())
        .ok_or(SummaryError::UncoveredAge { age })
}

/// The five age groups of the internship dashboard.
pub fn default_brackets() -> Vec<AgeBracket> {
    vec![
        AgeBracket::new("-18 até 21", 0, Some(21)),
        AgeBracket::new("22 até 25", 21, Some(25)),
        AgeBracket::new("26 até 29", 25, Some(29)),
        AgeBracket::new("30 até 34", 29, Some(34)),
        AgeBracket::new("35 ou +", 34, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let bracket = AgeBracket::new("22 até 25", 21, Some(25));
        assert!(bracket.contains(21));
        assert!(bracket.contains(24));
        assert!(!bracket.contains(25));
        assert!(!bracket.contains(20));
    }
}
