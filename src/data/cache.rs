//! Dataset Cache Module
//! Runs load -> tidy -> merge once and keeps the result for the process lifetime.

use super::filter::{filter_view, Selection, ViewTable};
use super::loader::{load_wide_table, LoaderError};
use super::merger::{merge, MergedTable};
use super::processor::tidy;
use super::value::Indicator;
use crate::config::DashboardConfig;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use tracing::{info, warn};

/// The merged table plus the selector domains derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub table: MergedTable,
    /// Distinct countries in first-appearance order
    pub countries: Vec<String>,
    /// Inclusive `(min, max)` year, `None` for an empty table
    pub year_range: Option<(i32, i32)>,
    pub max_gni_per_capita: Option<f64>,
    pub max_population: Option<i64>,
}

impl Dataset {
    pub fn from_table(table: MergedTable) -> Self {
        let countries: Vec<String> = {
            let mut seen = HashSet::new();
            table
                .rows
                .iter()
                .filter(|r| seen.insert(r.country.as_str()))
                .map(|r| r.country.clone())
                .collect()
        };

        let year_range = table.rows.iter().map(|r| r.year).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        });

        let max_gni_per_capita = table
            .rows
            .iter()
            .filter_map(|r| r.gni_per_capita)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

        let max_population = table.rows.iter().filter_map(|r| r.population).max();

        Self {
            table,
            countries,
            year_range,
            max_gni_per_capita,
            max_population,
        }
    }

    /// Load the three indicator files and run the whole pipeline.
    pub fn build(config: &DashboardConfig) -> Result<Self, LoaderError> {
        let life = load_wide_table(&config.life_expectancy_path(), config.load_fill)?;
        let population = load_wide_table(&config.population_path(), config.load_fill)?;
        let gni = load_wide_table(&config.gni_per_capita_path(), config.load_fill)?;

        let table = merge(
            &tidy(&life, Indicator::LifeExpectancy),
            &tidy(&population, Indicator::Population),
            &tidy(&gni, Indicator::GniPerCapita),
            config.merge_fill,
        );

        if table.is_empty() {
            warn!("no (country, year) pair is present in all three sources");
        }

        let dataset = Self::from_table(table);
        info!(
            rows = dataset.table.len(),
            countries = dataset.countries.len(),
            years = ?dataset.year_range,
            "dataset ready"
        );
        Ok(dataset)
    }

    /// Earliest year with every country selected.
    pub fn initial_selection(&self) -> Selection {
        let year = self.year_range.map(|(lo, _)| lo).unwrap_or_default();
        Selection::new(year, self.countries.iter().cloned())
    }

    pub fn view(&self, selection: &Selection) -> ViewTable {
        filter_view(&self.table, selection.year, &selection.countries)
    }
}

/// Single-assignment holder for the dataset.
pub struct DatasetCache {
    cell: OnceCell<Dataset>,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Build the dataset on first call, return the cached one afterwards.
    ///
    /// A failed build leaves the cache empty.
    pub fn get_or_load(&self, config: &DashboardConfig) -> Result<&Dataset, LoaderError> {
        self.cell.get_or_try_init(|| Dataset::build(config))
    }

    pub fn get(&self) -> Option<&Dataset> {
        self.cell.get()
    }
}

/// Process-wide dataset used by the dashboard.
pub static DATASET: DatasetCache = DatasetCache::new();
