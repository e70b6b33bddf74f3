//! Summary configuration.
//!
//! Everything the original dashboard hard-coded lives here: the expected
//! headers, the synonym tables, the age brackets, the metropolitan region
//! and the ranking size. Defaults reproduce the dashboard exactly, so a
//! config file is only needed when a spreadsheet deviates from it.

use crate::error::{Result as SummaryResult, SummaryError};
use crate::summarizer::brackets::{AgeBracket, default_brackets};
use crate::summarizer::columns::ColumnContract;
use crate::summarizer::normalize::{
    NormalizationTable, default_agreement_table, default_gender_table,
};
use crate::summarizer::region::RegionClassifier;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Header contract per record field
    pub columns: ColumnContract,
    /// CSV field separator (must be ASCII)
    pub csv_separator: char,
    /// Size of the integration agent ranking
    pub top_n: usize,
    pub age_brackets: Vec<AgeBracket>,
    pub region: RegionClassifier,
    pub gender: NormalizationTable,
    pub initiative: NormalizationTable,
    pub agreement_type: NormalizationTable,
    pub integration_agent: NormalizationTable,
    pub workload: NormalizationTable,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            columns: ColumnContract::default(),
            csv_separator: ',',
            top_n: 5,
            age_brackets: default_brackets(),
            region: RegionClassifier::default(),
            gender: default_gender_table(),
            initiative: NormalizationTable::passthrough(),
            agreement_type: default_agreement_table(),
            integration_agent: NormalizationTable::passthrough(),
            workload: NormalizationTable::passthrough(),
        }
    }
}

impl SummaryConfig {
    /// Default location of the user config file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("internstats").join("config.json"))
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self =
            serde_json::from_str(&contents).context("Failed to parse summary config JSON")?;

        Ok(config)
    }

    /// Load the given file, or the default location if it exists, or defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default = Self::default_path()?;
        if default.is_file() {
            tracing::info!("Using config at {}", default.display());
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    pub fn separator_byte(&self) -> SummaryResult<u8> {
        u8::try_from(self.csv_separator)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                SummaryError::Config(format!(
                    "CSV separator {:?} is not an ASCII character",
                    self.csv_separator
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("config.json");

        let config = SummaryConfig {
            csv_separator: ';',
            top_n: 3,
            ..SummaryConfig::default()
        };
        config.save(&path)?;

        assert_eq!(SummaryConfig::load(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "top_n": 10 }"#)?;

        let config = SummaryConfig::load(&path)?;
        assert_eq!(config.top_n, 10);
        assert_eq!(config.age_brackets, default_brackets());
        assert_eq!(config.csv_separator, ',');
        Ok(())
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        let config = SummaryConfig {
            csv_separator: '§',
            ..SummaryConfig::default()
        };
        assert!(config.separator_byte().is_err());
        assert_eq!(SummaryConfig::default().separator_byte().ok(), Some(b','));
    }
}
