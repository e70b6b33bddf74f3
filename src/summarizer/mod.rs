pub mod brackets;
pub mod columns;
pub mod counting;
pub mod dataset;
pub mod io;
pub mod normalize;
pub mod numeric;
pub mod region;
pub mod views;

pub use brackets::{AgeBracket, BracketTable, bucket_age, default_brackets};
pub use columns::{ColumnContract, ColumnSpec, Field};
pub use counting::{CategoryCount, CategoryEntry, count_by_category, top_n};
pub use dataset::{ColumnBinding, Dataset, Record};
pub use io::load_df;
pub use normalize::{
    EMPTY_LABEL, NormalizationTable, UnmatchedPolicy, clean_text, is_empty_label, normalize_text,
};
pub use numeric::{extract_numeric_prefix, mean, parse_number};
pub use region::{RegionClassifier, categorize};
pub use views::{
    AgeGenderPyramid, Averages, BracketCount, PyramidRow, SummaryReport, View, build_report,
};

#[cfg(test)]
mod tests;
