//! View Filter Module
//! Projects the merged table onto the current year/country selection.

use super::merger::{MergedRow, MergedTable};
use std::collections::HashSet;

/// The current dashboard selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub year: i32,
    pub countries: HashSet<String>,
}

impl Selection {
    pub fn new(year: i32, countries: impl IntoIterator<Item = String>) -> Self {
        Self {
            year,
            countries: countries.into_iter().collect(),
        }
    }
}

/// Rows matching one selection. Owned, so it can outlive the interaction that built it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewTable {
    pub year: i32,
    pub rows: Vec<MergedRow>,
}

impl ViewTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows of `table` where `row.year == year` and the country is selected.
pub fn filter_view(table: &MergedTable, year: i32, selected_countries: &HashSet<String>) -> ViewTable {
    let rows = table
        .rows
        .iter()
        .filter(|r| r.year == year && selected_countries.contains(&r.country))
        .cloned()
        .collect();

    ViewTable { year, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: i32) -> MergedRow {
        MergedRow {
            country: country.to_string(),
            year,
            life_expectancy: Some(70.0),
            population: Some(1_000),
            gni_per_capita: Some(1_000.0),
        }
    }

    fn table() -> MergedTable {
        MergedTable {
            rows: vec![row("Foo", 2000), row("Foo", 2001), row("Bar", 2000), row("Baz", 2000)],
        }
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_matching_year_and_countries() {
        let view = filter_view(&table(), 2000, &set(&["Foo", "Baz", "Nowhere"]));
        assert_eq!(view.year, 2000);
        assert_eq!(view.rows, vec![row("Foo", 2000), row("Baz", 2000)]);
    }

    #[test]
    fn is_pure() {
        let t = table();
        let before = t.clone();
        let countries = set(&["Foo", "Bar"]);

        let a = filter_view(&t, 2000, &countries);
        let b = filter_view(&t, 2000, &countries);
        assert_eq!(a, b);
        assert_eq!(t, before);
    }

    #[test]
    fn empty_selection_is_empty_view() {
        assert!(filter_view(&table(), 2000, &HashSet::new()).is_empty());
        assert!(filter_view(&table(), 1850, &set(&["Foo"])).is_empty());
    }
}
