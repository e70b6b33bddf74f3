use crate::error::{Result, ResultExt as _, SummaryError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Reads a table by file extension.
///
/// CSV is read with every column as text so that free-text cells such as
/// `"40h semanais"` or `"1.234,56"` reach the record parser untouched.
pub fn load_df(path: &Path, separator: u8) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(SummaryError::InvalidPath(format!(
            "{} is not a readable file",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()
            .context("Failed to read CSV")?,
        "parquet" => ParquetReader::new(open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        "json" => JsonReader::new(open(path)?)
            .finish()
            .context("Failed to read JSON")?,
        _ => {
            return Err(SummaryError::Config(format!(
                "Unsupported file extension: {ext:?}"
            )));
        }
    };

    Ok(df)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

/// Header names in table order.
pub fn headers(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// A column as optional strings, whatever its stored type.
pub fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_owned)).collect())
}
