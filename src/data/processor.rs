//! Tidy Transformer Module
//! Reshapes wide indicator tables into (country, year, value) rows (melt operation).

use super::loader::WideTable;
use super::value::{Indicator, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

static POPULATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)([kMB]?)$").expect("valid population pattern"));

/// A single observation in long format.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRow {
    pub country: String,
    /// `None` when the year label is not numeric
    pub year: Option<i32>,
    pub value: Value,
}

/// Long-format table for one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable {
    pub indicator: Indicator,
    pub rows: Vec<TidyRow>,
}

impl TidyTable {
    /// Name of the value column.
    pub fn value_name(&self) -> &'static str {
        self.indicator.column_name()
    }
}

/// Decode a size-suffixed population string (`"1.5k"`, `"2M"`, `"3B"`, `"42"`).
///
/// The numeric part is parsed as a float, multiplied by the suffix and
/// truncated toward zero. Anything else decodes to `None`.
pub fn decode_population(raw: &str) -> Option<i64> {
    let caps = POPULATION_RE.captures(raw)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k") => 1e3,
        Some("M") => 1e6,
        Some("B") => 1e9,
        _ => 1.0,
    };
    Some((number * multiplier) as i64)
}

/// Best-effort numeric coercion; unparseable text becomes `Missing`.
pub fn coerce_numeric(raw: &str) -> Value {
    raw.trim()
        .parse::<f64>()
        .map(Value::from_f64)
        .unwrap_or(Value::Missing)
}

/// Coerce a year header to an integer. `"2000"` and `"2000.0"` are accepted.
pub fn parse_year(label: &str) -> Option<i32> {
    let label = label.trim();
    if let Ok(year) = label.parse::<i32>() {
        return Some(year);
    }
    let year = label.parse::<f64>().ok()?;
    if year.fract() == 0.0 && year >= i32::MIN as f64 && year <= i32::MAX as f64 {
        Some(year as i32)
    } else {
        None
    }
}

fn decode_cell(indicator: Indicator, raw: &str) -> Value {
    match indicator {
        Indicator::Population => decode_population(raw)
            .map(|p| Value::Number(p as f64))
            .unwrap_or(Value::Missing),
        Indicator::LifeExpectancy | Indicator::GniPerCapita => coerce_numeric(raw),
    }
}

/// Melt a wide table into tidy rows, country-major then year-column order.
pub fn tidy(wide: &WideTable, indicator: Indicator) -> TidyTable {
    let years: Vec<Option<i32>> = wide.year_labels.iter().map(|l| parse_year(l)).collect();

    let mut rows = Vec::with_capacity(wide.rows.len() * years.len());
    let mut coerced = 0usize;

    for wide_row in &wide.rows {
        for (year, cell) in years.iter().zip(&wide_row.cells) {
            let value = match cell {
                Some(raw) => {
                    let v = decode_cell(indicator, raw);
                    if v.is_missing() {
                        coerced += 1;
                    }
                    v
                }
                None => Value::Missing,
            };
            rows.push(TidyRow {
                country: wide_row.country.clone(),
                year: *year,
                value,
            });
        }
    }

    if coerced > 0 {
        debug!(
            indicator = indicator.column_name(),
            cells = coerced,
            "cells coerced to missing"
        );
    }
    info!(
        indicator = indicator.column_name(),
        rows = rows.len(),
        "tidied indicator table"
    );

    TidyTable { indicator, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::WideRow;

    #[test]
    fn population_suffixes() {
        assert_eq!(decode_population("1.5k"), Some(1_500));
        assert_eq!(decode_population("2M"), Some(2_000_000));
        assert_eq!(decode_population("3B"), Some(3_000_000_000));
        assert_eq!(decode_population("42"), Some(42));
        assert_eq!(decode_population("abc"), None);
        assert_eq!(decode_population("1.5X"), None);
    }

    #[test]
    fn population_rejects_loose_forms() {
        assert_eq!(decode_population(""), None);
        assert_eq!(decode_population("1."), None);
        assert_eq!(decode_population("-5k"), None);
        assert_eq!(decode_population("5 k"), None);
        assert_eq!(decode_population("5m"), None);
    }

    #[test]
    fn population_truncates() {
        assert_eq!(decode_population("1.9999"), Some(1));
        assert_eq!(decode_population("0.0015k"), Some(1));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(coerce_numeric("70.5"), Value::Number(70.5));
        assert_eq!(coerce_numeric(" 12 "), Value::Number(12.0));
        assert_eq!(coerce_numeric("n/a"), Value::Missing);
        assert_eq!(coerce_numeric("NaN"), Value::Missing);
    }

    #[test]
    fn year_labels() {
        assert_eq!(parse_year("2000"), Some(2000));
        assert_eq!(parse_year("2000.0"), Some(2000));
        assert_eq!(parse_year("2000.5"), None);
        assert_eq!(parse_year("Unnamed: 3"), None);
    }

    #[test]
    fn tidy_is_country_major_and_keeps_missing_cells() {
        let wide = WideTable {
            index_name: "country".into(),
            year_labels: vec!["2000".into(), "2001".into()],
            rows: vec![
                WideRow {
                    country: "Foo".into(),
                    cells: vec![Some("1k".into()), Some("oops".into())],
                },
                WideRow {
                    country: "Bar".into(),
                    cells: vec![None, Some("2M".into())],
                },
            ],
        };

        let t = tidy(&wide, Indicator::Population);
        assert_eq!(t.value_name(), "population");

        let got: Vec<(&str, Option<i32>, Value)> = t
            .rows
            .iter()
            .map(|r| (r.country.as_str(), r.year, r.value))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Foo", Some(2000), Value::Number(1000.0)),
                ("Foo", Some(2001), Value::Missing),
                ("Bar", Some(2000), Value::Missing),
                ("Bar", Some(2001), Value::Number(2_000_000.0)),
            ]
        );
    }
}
