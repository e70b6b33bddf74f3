//! Centralized error handling for internstats.
//!
//! Two kinds of failure exist in the summarizer:
//!
//! - **Data-quality problems** (blank cells, unparseable numbers, unknown
//!   category spellings) never surface here. They are absorbed where they occur
//!   by falling back to the empty label or an absent number.
//! - **Configuration problems** (a header that cannot be found, an age outside
//!   every bracket, a malformed bracket table) are reported through
//!   [`SummaryError`] and abort only the view that needed them.
//!
//! ```
//! use internstats::error::SummaryError;
//! use internstats::summarizer::Field;
//!
//! let err = SummaryError::MissingColumn {
//!     field: Field::AgreementType,
//!     expected: "header containing \"CONVÊNIO\"".to_owned(),
//! };
//! assert!(err.to_string().contains("agreement_type"));
//! ```

use crate::summarizer::Field;
use std::fmt;

/// Main error type for internstats operations.
#[derive(Debug)]
pub enum SummaryError {
    /// I/O errors (reading the input file, writing output)
    Io(std::io::Error),

    /// Loading or converting the table failed (Polars, parsing, etc.)
    DataProcessing(String),

    /// Configuration errors (bad config file, unsupported format)
    Config(String),

    /// No header in the table satisfies the column contract for a field
    MissingColumn { field: Field, expected: String },

    /// An observed age falls outside every configured bracket
    UncoveredAge { age: i64 },

    /// The bracket table does not partition the age domain
    InvalidBrackets(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::MissingColumn { field, expected } => write!(
                f,
                "Missing column for '{}': expected {expected}",
                field.name()
            ),
            Self::UncoveredAge { age } => {
                write!(f, "Age {age} is not covered by any configured age bracket")
            }
            Self::InvalidBrackets(msg) => write!(f, "Invalid age brackets: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SummaryError {}

impl SummaryError {
    /// Whether this error comes from the column contract or bracket table
    /// rather than from I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::MissingColumn { .. }
                | Self::UncoveredAge { .. }
                | Self::InvalidBrackets(_)
        )
    }
}

impl From<std::io::Error> for SummaryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for SummaryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for SummaryError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for internstats operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SummaryError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: SummaryError = e.into();
            SummaryError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: SummaryError = e.into();
            SummaryError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SummaryError::UncoveredAge { age: -3 };
        assert_eq!(
            err.to_string(),
            "Age -3 is not covered by any configured age bracket"
        );
    }

    #[test]
    fn test_missing_column_names_field_and_expectation() {
        let err = SummaryError::MissingColumn {
            field: Field::Workload,
            expected: "header \"CARGA HORÁRIA\"".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("workload"));
        assert!(msg.contains("CARGA HORÁRIA"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_io_is_not_configuration() {
        let err: SummaryError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "estagios.csv").into();
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.txt",
        ));

        let result: Result<()> = result.context("Failed to read file");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read file")
        );
    }

    #[test]
    fn test_result_with_context_formats_lazily() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        let err = result
            .with_context(|| format!("Failed to open {}", "estagios.parquet"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to open estagios.parquet: I/O error: denied");
    }
}
