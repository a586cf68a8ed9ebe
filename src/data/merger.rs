//! Merger Module
//! Inner-joins the three tidy tables on (country, year) and fills residual gaps.

use super::processor::TidyTable;
use super::value::{FillScope, Value};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// One joined observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRow {
    pub country: String,
    pub year: i32,
    pub life_expectancy: Option<f64>,
    pub population: Option<i64>,
    pub gni_per_capita: Option<f64>,
}

/// The combined indicator table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTable {
    pub rows: Vec<MergedRow>,
}

fn carry<T: Copy>(slot: &mut Option<T>, last: &mut Option<T>) {
    match slot {
        Some(v) => *last = Some(*v),
        None => *slot = *last,
    }
}

#[derive(Default, Clone, Copy)]
struct Carry {
    life_expectancy: Option<f64>,
    population: Option<i64>,
    gni_per_capita: Option<f64>,
}

impl Carry {
    fn apply(&mut self, row: &mut MergedRow) {
        carry(&mut row.life_expectancy, &mut self.life_expectancy);
        carry(&mut row.population, &mut self.population);
        carry(&mut row.gni_per_capita, &mut self.gni_per_capita);
    }
}

impl MergedTable {
    /// Replace each `None` with the nearest preceding value in row order.
    ///
    /// With `FillScope::Table` values cross country boundaries, so the result
    /// depends on the current row order.
    pub fn forward_fill(&mut self, scope: FillScope) {
        match scope {
            FillScope::Table => {
                let mut state = Carry::default();
                for row in &mut self.rows {
                    state.apply(row);
                }
            }
            FillScope::Country => {
                let mut states: HashMap<String, Carry> = HashMap::new();
                for row in &mut self.rows {
                    states.entry(row.country.clone()).or_default().apply(row);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Index a tidy table by (country, year). Rows with an unparsed year are skipped.
fn index_by_key(table: &TidyTable) -> HashMap<(&str, i32), Value> {
    let mut index = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        let Some(year) = row.year else {
            continue;
        };
        match index.entry((row.country.as_str(), year)) {
            Entry::Vacant(slot) => {
                slot.insert(row.value);
            }
            Entry::Occupied(_) => {
                warn!(
                    indicator = table.value_name(),
                    country = %row.country,
                    year,
                    "duplicate key, keeping first occurrence"
                );
            }
        }
    }
    index
}

/// Inner-join three tidy tables, keeping the life expectancy row order, then forward-fill.
pub fn merge(
    life_expectancy: &TidyTable,
    population: &TidyTable,
    gni_per_capita: &TidyTable,
    fill_scope: FillScope,
) -> MergedTable {
    let population_index = index_by_key(population);
    let gni_index = index_by_key(gni_per_capita);

    let mut seen: HashSet<(&str, i32)> = HashSet::new();
    let mut rows = Vec::with_capacity(life_expectancy.rows.len());

    for row in &life_expectancy.rows {
        let Some(year) = row.year else {
            continue;
        };
        let key = (row.country.as_str(), year);
        if !seen.insert(key) {
            continue;
        }
        let (Some(pop), Some(gni)) = (population_index.get(&key), gni_index.get(&key)) else {
            continue;
        };

        rows.push(MergedRow {
            country: row.country.clone(),
            year,
            life_expectancy: row.value.as_f64(),
            population: pop.as_f64().map(|p| p as i64),
            gni_per_capita: gni.as_f64(),
        });
    }

    info!(
        kept = rows.len(),
        dropped = life_expectancy.rows.len() - rows.len(),
        "merged indicator tables"
    );

    let mut table = MergedTable { rows };
    table.forward_fill(fill_scope);
    table
}
