//! Statistics Calculator Module
//! Descriptive statistics for the rows currently shown on the chart.

use crate::data::ViewTable;
use statrs::statistics::{Data, Distribution, Median};

/// Descriptive statistics for one indicator within a view.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, `None` below two observations
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Summary strip shown under the bubble chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSummary {
    pub rows: usize,
    pub total_population: i64,
    /// Life expectancy averaged with population weights
    pub weighted_life_expectancy: Option<f64>,
    pub life_expectancy: Option<IndicatorStats>,
    pub gni_per_capita: Option<IndicatorStats>,
}

/// Computes view summaries.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values. `None` when empty.
    pub fn compute_descriptive_stats(values: &[f64]) -> Option<IndicatorStats> {
        if values.is_empty() {
            return None;
        }

        let data = Data::new(values.to_vec());
        let mean = data.mean()?;
        let std = if values.len() > 1 {
            data.std_dev().filter(|s| !s.is_nan())
        } else {
            None
        };
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        Some(IndicatorStats {
            count: values.len(),
            mean,
            median: data.median(),
            std,
            min,
            max,
        })
    }

    /// Population-weighted mean of life expectancy over rows carrying both fields.
    pub fn weighted_life_expectancy(view: &ViewTable) -> Option<f64> {
        let (weighted, weight) = view
            .rows
            .iter()
            .filter_map(|r| Some((r.life_expectancy?, r.population? as f64)))
            .fold((0.0, 0.0), |(s, w), (le, pop)| (s + le * pop, w + pop));

        (weight > 0.0).then(|| weighted / weight)
    }

    pub fn summarize(view: &ViewTable) -> ViewSummary {
        let life: Vec<f64> = view.rows.iter().filter_map(|r| r.life_expectancy).collect();
        let gni: Vec<f64> = view.rows.iter().filter_map(|r| r.gni_per_capita).collect();

        ViewSummary {
            rows: view.rows.len(),
            total_population: view.rows.iter().filter_map(|r| r.population).sum(),
            weighted_life_expectancy: Self::weighted_life_expectancy(view),
            life_expectancy: Self::compute_descriptive_stats(&life),
            gni_per_capita: Self::compute_descriptive_stats(&gni),
        }
    }
}
