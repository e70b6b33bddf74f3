//! Records and the immutable dataset they form.

use super::columns::{ColumnContract, Field};
use super::io;
use super::numeric::{extract_numeric_prefix, parse_age, parse_number};
use crate::config::SummaryConfig;
use crate::error::{Result, SummaryError};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One internship record. Unparseable cells are `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Record {
    pub age: Option<i64>,
    pub tenure_months: Option<f64>,
    pub total_compensation: Option<f64>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub initiative: Option<String>,
    pub agreement_type: Option<String>,
    pub integration_agent: Option<String>,
    pub workload: Option<String>,
}

impl Record {
    /// Raw text of a text field. Numeric fields give `None`.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Gender => self.gender.as_deref(),
            Field::City => self.city.as_deref(),
            Field::Initiative => self.initiative.as_deref(),
            Field::AgreementType => self.agreement_type.as_deref(),
            Field::IntegrationAgent => self.integration_agent.as_deref(),
            Field::Workload => self.workload.as_deref(),
            Field::Age | Field::TenureMonths | Field::TotalCompensation => None,
        }
    }

    /// Numeric value of a field. For the workload this is the embedded hour
    /// count; other text fields give `None`.
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Age => self.age.map(|a| a as f64),
            Field::TenureMonths => self.tenure_months,
            Field::TotalCompensation => self.total_compensation,
            Field::Workload => self.workload.as_deref().and_then(extract_numeric_prefix),
            Field::Gender
            | Field::City
            | Field::Initiative
            | Field::AgreementType
            | Field::IntegrationAgent => None,
        }
    }

    /// Stores a raw cell, parsing numeric fields.
    pub fn set(&mut self, field: Field, raw: Option<String>) {
        match field {
            Field::Age => self.age = raw.as_deref().and_then(parse_age),
            Field::TenureMonths => self.tenure_months = raw.as_deref().and_then(parse_number),
            Field::TotalCompensation => {
                self.total_compensation = raw.as_deref().and_then(parse_number);
            }
            Field::Gender => self.gender = raw,
            Field::City => self.city = raw,
            Field::Initiative => self.initiative = raw,
            Field::AgreementType => self.agreement_type = raw,
            Field::IntegrationAgent => self.integration_agent = raw,
            Field::Workload => self.workload = raw,
        }
    }
}

/// Where a field's values came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnBinding {
    /// Read from this header.
    Header(String),
    /// No header satisfied the contract.
    Missing { expected: String },
}

/// The loaded table. Never modified after construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
    bindings: BTreeMap<Field, ColumnBinding>,
}

impl Dataset {
    /// Wraps in-memory records; every field counts as present.
    pub fn from_records(records: Vec<Record>) -> Self {
        let bindings = Field::ALL
            .into_iter()
            .map(|f| (f, ColumnBinding::Header(f.name().to_owned())))
            .collect();
        Self { records, bindings }
    }

    /// Converts a table into records using the column contract.
    ///
    /// Fields without a matching header are recorded as missing rather than
    /// failing the whole load; only views that need them fail later.
    pub fn from_frame(df: &DataFrame, contract: &ColumnContract) -> Result<Self> {
        let headers = io::headers(df);
        let mut records = vec![Record::default(); df.height()];
        let mut bindings = BTreeMap::new();

        for field in Field::ALL {
            let resolved = contract.spec(field).map(|spec| (spec.resolve(&headers), spec));
            let binding = match resolved {
                Some((Some(header), _)) => {
                    let values = io::text_column(df, header)?;
                    for (record, value) in records.iter_mut().zip(values) {
                        record.set(field, value);
                    }
                    tracing::debug!("Field '{}' bound to header {:?}", field, header);
                    ColumnBinding::Header(header.to_owned())
                }
                Some((None, spec)) => {
                    let expected = spec.describe();
                    tracing::warn!("No header for field '{}': expected {}", field, expected);
                    ColumnBinding::Missing { expected }
                }
                None => {
                    tracing::warn!("No column spec configured for field '{}'", field);
                    ColumnBinding::Missing {
                        expected: "a configured column spec".to_owned(),
                    }
                }
            };
            bindings.insert(field, binding);
        }

        Ok(Self { records, bindings })
    }

    /// Loads a file and converts it with the configured contract.
    pub fn load(path: &Path, config: &SummaryConfig) -> Result<Self> {
        let df = io::load_df(path, config.separator_byte()?)?;
        tracing::info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Self::from_frame(&df, &config.columns)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn bindings(&self) -> &BTreeMap<Field, ColumnBinding> {
        &self.bindings
    }

    /// Fails with [`SummaryError::MissingColumn`] if `field` has no source header.
    pub fn require(&self, field: Field) -> Result<()> {
        match self.bindings.get(&field) {
            Some(ColumnBinding::Header(_)) => Ok(()),
            Some(ColumnBinding::Missing { expected }) => Err(SummaryError::MissingColumn {
                field,
                expected: expected.clone(),
            }),
            None => Err(SummaryError::MissingColumn {
                field,
                expected: "a configured column spec".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_parses_numeric_fields() {
        let mut record = Record::default();
        record.set(Field::Age, Some("22.0".to_owned()));
        record.set(Field::TotalCompensation, Some("R$ 1.100,50".to_owned()));
        record.set(Field::TenureMonths, Some("sem dado".to_owned()));
        assert_eq!(record.age, Some(22));
        assert_eq!(record.total_compensation, Some(1100.5));
        assert_eq!(record.tenure_months, None);
    }

    #[test]
    fn test_workload_number_is_hour_count() {
        let record = Record {
            workload: Some("30h semanais".to_owned()),
            ..Record::default()
        };
        assert_eq!(record.number(Field::Workload), Some(30.0));
        assert_eq!(record.text(Field::Age), None);
    }
}
