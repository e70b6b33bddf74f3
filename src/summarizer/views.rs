//! The named views of the internship summary.
//!
//! Each view is built independently from the [`Dataset`]. A configuration
//! error (missing header, uncovered age, bad bracket table) fails only the
//! view that hit it; the report still carries every other view.

use super::brackets::BracketTable;
use super::columns::Field;
use super::counting::{CategoryCount, CategoryEntry, count_by_category};
use super::dataset::{ColumnBinding, Dataset};
use super::normalize::{NormalizationTable, is_empty_label, normalize_text};
use super::numeric::mean;
use super::region::RegionClassifier;
use crate::config::SummaryConfig;
use crate::error::{Result, SummaryError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of building one view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum View<T> {
    Ready(T),
    Failed(String),
}

impl<T> View<T> {
    fn build(name: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => {
                tracing::debug!("View '{}' built", name);
                Self::Ready(value)
            }
            Err(e) => {
                tracing::warn!("View '{}' failed: {}", name, e);
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(msg) => Some(msg),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BracketCount {
    pub label: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PyramidRow {
    pub bracket: String,
    /// Aligned with [`AgeGenderPyramid::genders`].
    pub counts: Vec<u64>,
}

/// Records per age bracket and gender, empty gender excluded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgeGenderPyramid {
    pub genders: Vec<String>,
    pub rows: Vec<PyramidRow>,
}

impl AgeGenderPyramid {
    pub fn count(&self, bracket: &str, gender: &str) -> u64 {
        let Some(column) = self.genders.iter().position(|g| g == gender) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|row| row.bracket == bracket)
            .and_then(|row| row.counts.get(column).copied())
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Averages {
    pub age: View<Option<f64>>,
    pub tenure_months: View<Option<f64>>,
    pub total_compensation: View<Option<f64>>,
    pub workload_hours: View<Option<f64>>,
}

/// Every view of the summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryReport {
    pub record_count: usize,
    pub columns: BTreeMap<Field, ColumnBinding>,
    pub gender: View<CategoryCount>,
    pub age_brackets: View<Vec<BracketCount>>,
    pub age_gender_pyramid: View<AgeGenderPyramid>,
    pub region: View<CategoryCount>,
    pub initiative: View<CategoryCount>,
    pub agreement_type: View<CategoryCount>,
    pub top_integration_agents: View<Vec<CategoryEntry>>,
    pub workload_ranking: View<Vec<CategoryEntry>>,
    pub averages: Averages,
}

impl SummaryReport {
    /// Messages of the views that failed, by view name.
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        [
            ("gender", self.gender.error()),
            ("age_brackets", self.age_brackets.error()),
            ("age_gender_pyramid", self.age_gender_pyramid.error()),
            ("region", self.region.error()),
            ("initiative", self.initiative.error()),
            ("agreement_type", self.agreement_type.error()),
            ("top_integration_agents", self.top_integration_agents.error()),
            ("workload_ranking", self.workload_ranking.error()),
            ("average_age", self.averages.age.error()),
            ("average_tenure_months", self.averages.tenure_months.error()),
            (
                "average_total_compensation",
                self.averages.total_compensation.error(),
            ),
            ("average_workload_hours", self.averages.workload_hours.error()),
        ]
        .into_iter()
        .filter_map(|(name, err)| err.map(|e| (name, e)))
        .collect()
    }
}

pub fn category_view(
    dataset: &Dataset,
    field: Field,
    table: &NormalizationTable,
) -> Result<CategoryCount> {
    dataset.require(field)?;
    Ok(count_by_category(dataset.records(), field, table))
}

pub fn ranking_view(
    dataset: &Dataset,
    field: Field,
    table: &NormalizationTable,
    limit: Option<usize>,
) -> Result<Vec<CategoryEntry>> {
    let counts = category_view(dataset, field, table)?;
    Ok(match limit {
        Some(n) => counts.top_n(n),
        None => counts.ranked(),
    })
}

pub fn region_counts(dataset: &Dataset, classifier: &RegionClassifier) -> Result<CategoryCount> {
    dataset.require(Field::City)?;
    Ok(CategoryCount::from_labels(
        dataset
            .records()
            .iter()
            .map(|r| classifier.classify(r.city.as_deref())),
    ))
}

/// Records per bracket in bracket order, zero counts included. Records
/// without an age are skipped.
pub fn age_bracket_counts(dataset: &Dataset, table: &BracketTable) -> Result<Vec<BracketCount>> {
    dataset.require(Field::Age)?;

    let mut counts = vec![0_u64; table.len()];
    for age in dataset.records().iter().filter_map(|r| r.age) {
        let index = table.index_of(age)?;
        if let Some(slot) = counts.get_mut(index) {
            *slot += 1;
        }
    }

    Ok(table
        .labels()
        .zip(counts)
        .map(|(label, count)| BracketCount {
            label: label.to_owned(),
            count,
        })
        .collect())
}

pub fn age_gender_pyramid(
    dataset: &Dataset,
    table: &BracketTable,
    genders: &NormalizationTable,
) -> Result<AgeGenderPyramid> {
    dataset.require(Field::Age)?;
    dataset.require(Field::Gender)?;

    let mut columns: Vec<String> = Vec::new();
    let mut cells: Vec<(usize, usize)> = Vec::new();
    for record in dataset.records() {
        let gender = normalize_text(record.gender.as_deref(), genders);
        if is_empty_label(&gender) {
            continue;
        }
        let Some(age) = record.age else {
            continue;
        };
        let row = table.index_of(age)?;
        let column = match columns.iter().position(|g| *g == gender) {
            Some(i) => i,
            None => {
                columns.push(gender);
                columns.len() - 1
            }
        };
        cells.push((row, column));
    }

    let mut rows: Vec<PyramidRow> = table
        .labels()
        .map(|label| PyramidRow {
            bracket: label.to_owned(),
            counts: vec![0; columns.len()],
        })
        .collect();
    for (row, column) in cells {
        if let Some(slot) = rows.get_mut(row).and_then(|r| r.counts.get_mut(column)) {
            *slot += 1;
        }
    }

    Ok(AgeGenderPyramid {
        genders: columns,
        rows,
    })
}

pub fn average(dataset: &Dataset, field: Field) -> Result<Option<f64>> {
    dataset.require(field)?;
    Ok(mean(dataset.records().iter().map(|r| r.number(field))))
}

fn with_brackets<T>(
    brackets: &Result<BracketTable>,
    build: impl FnOnce(&BracketTable) -> Result<T>,
) -> Result<T> {
    match brackets {
        Ok(table) => build(table),
        Err(e) => Err(SummaryError::Other(e.to_string())),
    }
}

/// Builds every view. Pure: the same dataset and config give the same report.
pub fn build_report(dataset: &Dataset, config: &SummaryConfig) -> SummaryReport {
    tracing::info!("Summarizing {} records", dataset.len());
    let brackets = BracketTable::new(config.age_brackets.clone());

    let averages = Averages {
        age: View::build("average_age", average(dataset, Field::Age)),
        tenure_months: View::build(
            "average_tenure_months",
            average(dataset, Field::TenureMonths),
        ),
        total_compensation: View::build(
            "average_total_compensation",
            average(dataset, Field::TotalCompensation),
        ),
        workload_hours: View::build(
            "average_workload_hours",
            average(dataset, Field::Workload),
        ),
    };

    let report = SummaryReport {
        record_count: dataset.len(),
        columns: dataset.bindings().clone(),
        gender: View::build(
            "gender",
            category_view(dataset, Field::Gender, &config.gender),
        ),
        age_brackets: View::build(
            "age_brackets",
            with_brackets(&brackets, |t| age_bracket_counts(dataset, t)),
        ),
        age_gender_pyramid: View::build(
            "age_gender_pyramid",
            with_brackets(&brackets, |t| age_gender_pyramid(dataset, t, &config.gender)),
        ),
        region: View::build("region", region_counts(dataset, &config.region)),
        initiative: View::build(
            "initiative",
            category_view(dataset, Field::Initiative, &config.initiative),
        ),
        agreement_type: View::build(
            "agreement_type",
            category_view(dataset, Field::AgreementType, &config.agreement_type),
        ),
        top_integration_agents: View::build(
            "top_integration_agents",
            ranking_view(
                dataset,
                Field::IntegrationAgent,
                &config.integration_agent,
                Some(config.top_n),
            ),
        ),
        workload_ranking: View::build(
            "workload_ranking",
            ranking_view(dataset, Field::Workload, &config.workload, None),
        ),
        averages,
    };

    let failed = report.failures().len();
    if failed > 0 {
        tracing::warn!("{} view(s) could not be built", failed);
    }
    report
}
