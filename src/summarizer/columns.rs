//! The column contract: which header feeds which record field.
//!
//! Spreadsheet exports are inconsistent about headers (`"TIPO\nCONVÊNIO"`,
//! `"Tipo Convênio"`, ...). Each [`Field`] therefore has a [`ColumnSpec`]
//! listing exact header names and fallback substrings. Headers are compared
//! after collapsing whitespace and case folding. Exact names are tried first;
//! otherwise the first header (in table order) containing a fallback substring
//! is taken.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A field of an internship record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    TenureMonths,
    TotalCompensation,
    Gender,
    City,
    Initiative,
    AgreementType,
    IntegrationAgent,
    Workload,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::Age,
        Self::TenureMonths,
        Self::TotalCompensation,
        Self::Gender,
        Self::City,
        Self::Initiative,
        Self::AgreementType,
        Self::IntegrationAgent,
        Self::Workload,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::TenureMonths => "tenure_months",
            Self::TotalCompensation => "total_compensation",
            Self::Gender => "gender",
            Self::City => "city",
            Self::Initiative => "initiative",
            Self::AgreementType => "agreement_type",
            Self::IntegrationAgent => "integration_agent",
            Self::Workload => "workload",
        }
    }

    /// Whether the field holds free text rather than a number.
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Age | Self::TenureMonths | Self::TotalCompensation)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted headers for one field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Header names matched in full.
    pub exact: Vec<String>,
    /// Fallback substrings searched across all headers.
    pub contains: Vec<String>,
}

impl ColumnSpec {
    pub fn exact(name: &str) -> Self {
        Self {
            exact: vec![name.to_owned()],
            contains: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, substring: &str) -> Self {
        self.contains.push(substring.to_owned());
        self
    }

    /// Finds the header this spec selects, if any.
    pub fn resolve<'a>(&self, headers: &'a [String]) -> Option<&'a str> {
        let folded: Vec<String> = headers.iter().map(|h| fold_header(h)).collect();

        for name in &self.exact {
            let wanted = fold_header(name);
            if let Some(i) = folded.iter().position(|h| *h == wanted) {
                return headers.get(i).map(String::as_str);
            }
        }

        for substring in &self.contains {
            let wanted = fold_header(substring);
            if wanted.is_empty() {
                continue;
            }
            if let Some(i) = folded.iter().position(|h| h.contains(&wanted)) {
                return headers.get(i).map(String::as_str);
            }
        }

        None
    }

    /// Human-readable description of what this spec accepts, for errors.
    pub fn describe(&self) -> String {
        let exact = self
            .exact
            .iter()
            .map(|n| format!("{n:?}"))
            .collect::<Vec<_>>()
            .join(" or ");
        let contains = self
            .contains
            .iter()
            .map(|n| format!("{n:?}"))
            .collect::<Vec<_>>()
            .join(" or ");

        match (exact.is_empty(), contains.is_empty()) {
            (true, true) => "no accepted headers configured".to_owned(),
            (false, true) => format!("a header named {exact}"),
            (true, false) => format!("a header containing {contains}"),
            (false, false) => format!("a header named {exact} or containing {contains}"),
        }
    }
}

fn fold_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Column specs for every field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnContract(BTreeMap<Field, ColumnSpec>);

impl Default for ColumnContract {
    fn default() -> Self {
        let specs = [
            (Field::Age, ColumnSpec::exact("IDADE")),
            (Field::TenureMonths, ColumnSpec::exact("Tempo em meses")),
            (
                Field::TotalCompensation,
                ColumnSpec::exact("Total de vencimentos"),
            ),
            (
                Field::Gender,
                ColumnSpec::exact("GÊNERO").with_fallback("GÊNERO"),
            ),
            (Field::City, ColumnSpec::exact("CIDADE")),
            (Field::Initiative, ColumnSpec::exact("INICIATIVA")),
            (
                Field::AgreementType,
                ColumnSpec::exact("TIPO CONVÊNIO").with_fallback("CONVÊNIO"),
            ),
            (
                Field::IntegrationAgent,
                ColumnSpec::exact("AGENTE INTEGRAÇÃO").with_fallback("INTEGRAÇÃO"),
            ),
            (
                Field::Workload,
                ColumnSpec::exact("CARGA HORÁRIA").with_fallback("CARGA"),
            ),
        ];
        Self(specs.into_iter().collect())
    }
}

impl ColumnContract {
    pub fn spec(&self, field: Field) -> Option<&ColumnSpec> {
        self.0.get(&field)
    }

    pub fn set(&mut self, field: Field, spec: ColumnSpec) {
        self.0.insert(field, spec);
    }
}
