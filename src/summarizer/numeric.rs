//! Numeric helpers: cell parsing, digit-run extraction and means.

use regex::Regex;
use std::sync::LazyLock;

#[expect(clippy::unwrap_used)]
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Parses the first contiguous run of ASCII digits in `text`.
///
/// `"40h semanais"` gives `Some(40.0)`; `"variável"` gives `None`.
pub fn extract_numeric_prefix(text: &str) -> Option<f64> {
    DIGIT_RUN
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Arithmetic mean over the present finite values. `None` when nothing is
/// present.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0_u64), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Parses a numeric cell read as text.
///
/// Accepts plain decimals (`"1234.5"`), a leading currency marker (`"R$ 900"`)
/// and Brazilian formatting (`"1.234,56"`). Without a decimal comma a dot is
/// always the decimal point, so `"1.100"` is 1.1. Infinities and anything
/// else are `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = trimmed.parse::<f64>() {
        return v.is_finite().then_some(v);
    }

    if trimmed.contains(',') {
        let localized = trimmed.replace('.', "").replace(',', ".");
        if let Ok(v) = localized.parse::<f64>() {
            return v.is_finite().then_some(v);
        }
    }

    None
}

/// Parses an age cell, flooring fractional values (`"21.0"` from spreadsheets).
pub fn parse_age(text: &str) -> Option<i64> {
    parse_number(text).map(|v| v.floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_takes_first_run_only() {
        assert_eq!(extract_numeric_prefix("6h/dia, 30h semanais"), Some(6.0));
        assert_eq!(extract_numeric_prefix("carga: 20 horas"), Some(20.0));
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("1234.5"), Some(1234.5));
        assert_eq!(parse_number(" R$ 900 "), Some(900.0));
        assert_eq!(parse_number("1.234,56"), Some(1234.56));
        assert_eq!(parse_number("850,00"), Some(850.0));
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-Infinity"), None);
        assert_eq!(parse_number("1e400"), None);
        assert_eq!(parse_number("a combinar"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_dot_without_comma_is_decimal_point() {
        // Typed float columns cast to text use a dot decimal point.
        assert_eq!(parse_number("1.100"), Some(1.1));
        assert_eq!(parse_number("1.100,00"), Some(1100.0));
    }

    #[test]
    fn test_overlong_digit_run_is_absent() {
        let hours = format!("{}h semanais", "9".repeat(400));
        assert_eq!(extract_numeric_prefix(&hours), None);
    }

    #[test]
    fn test_mean_skips_infinite_values() {
        assert_eq!(
            mean([Some(6.0), Some(f64::INFINITY), Some(12.0), None]),
            Some(9.0)
        );
        assert_eq!(mean([Some(f64::NEG_INFINITY)]), None);
    }

    #[test]
    fn test_parse_age_floors() {
        assert_eq!(parse_age("21.0"), Some(21));
        assert_eq!(parse_age("24.9"), Some(24));
        assert_eq!(parse_age("inf"), None);
    }
}
