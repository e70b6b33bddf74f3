//! # internstats - internship spreadsheet summaries
//!
//! Loads a table of internship records (CSV, Parquet or JSON) and derives the
//! aggregate views of the internship dashboard: gender split, age brackets and
//! the age/gender pyramid, metropolitan region, initiative and agreement types,
//! the top integration agents, the workload ranking and the averages of age,
//! tenure, compensation and weekly hours.
//!
//! ## Quick Start
//!
//! ```no_run
//! use internstats::config::SummaryConfig;
//! use internstats::summarizer::{Dataset, build_report};
//! use std::path::Path;
//!
//! # fn example() -> internstats::error::Result<()> {
//! let config = SummaryConfig::default();
//! let dataset = Dataset::load(Path::new("estagios.csv"), &config)?;
//! let report = build_report(&dataset, &config);
//!
//! if let Some(gender) = report.gender.ready() {
//!     for entry in gender.iter() {
//!         println!("{}: {}", entry.label, entry.count);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`summarizer`]: records, normalization, counting and the report views
//! - [`config`]: header contract, synonym tables, brackets and region settings
//! - [`report`]: text and JSON renderings of a report
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing subscriber setup
//!
//! ## Failure Model
//!
//! Messy cells never fail: blanks and unknown spellings become the `vazio`
//! label, unparseable numbers are left out of averages. A missing header or an
//! age outside the configured brackets fails only the views that need it, so
//! the rest of the report is still produced.

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod summarizer;
pub mod utils;
