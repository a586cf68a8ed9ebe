//! Cell values and indicator identities shared by every pipeline stage.

use serde::Deserialize;

/// A single numeric cell after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    Number(f64),
    #[default]
    Missing,
}

impl Value {
    /// Wrap a float, normalising `NaN` to `Missing`.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            Value::Missing
        } else {
            Value::Number(v)
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(v),
            Value::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map(Value::from_f64).unwrap_or(Value::Missing)
    }
}

/// The three indicators the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    LifeExpectancy,
    Population,
    GniPerCapita,
}

impl Indicator {
    /// Column name used in tidy/merged tables and chart encodings.
    pub fn column_name(self) -> &'static str {
        match self {
            Indicator::LifeExpectancy => "life_expectancy",
            Indicator::Population => "population",
            Indicator::GniPerCapita => "gni_per_capita",
        }
    }

    /// Human readable label for axes and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::LifeExpectancy => "Life expectancy",
            Indicator::Population => "Population",
            Indicator::GniPerCapita => "GNI per capita",
        }
    }
}

/// Direction of the forward fill applied to raw wide tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillAxis {
    /// Carry values rightwards along a country's row (earlier year to later year)
    #[default]
    Row,
    /// Carry values downwards along a year column (previous country to next)
    Column,
}

/// Grouping of the forward fill applied to the merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillScope {
    /// Walk the whole table in row order, crossing country boundaries
    #[default]
    Table,
    /// Only carry values between rows of the same country
    Country,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_missing() {
        assert_eq!(Value::from_f64(f64::NAN), Value::Missing);
        assert_eq!(Value::from(Some(f64::NAN)), Value::Missing);
        assert_eq!(Value::from(Some(2.5)).as_f64(), Some(2.5));
        assert!(Value::from(None::<f64>).is_missing());
    }
}
