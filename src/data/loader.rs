//! Wide Table Loader Module
//! Reads country-by-year CSV files with Polars and forward-fills missing cells.

use super::value::FillAxis;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("CSV {path} has no country column")]
    MissingCountryColumn { path: PathBuf },
}

/// One country's row of raw, still string-encoded cells.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub country: String,
    /// One entry per year label; `None` is an absent cell
    pub cells: Vec<Option<String>>,
}

/// A raw indicator table: one row per country, one column per year.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    /// Header of the first column
    pub index_name: String,
    /// Remaining headers, in file order
    pub year_labels: Vec<String>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    /// Forward-fill absent cells. Leading gaps stay absent.
    pub fn forward_fill(&mut self, axis: FillAxis) {
        match axis {
            FillAxis::Row => {
                for row in &mut self.rows {
                    let mut last: Option<String> = None;
                    for cell in &mut row.cells {
                        match cell {
                            Some(v) => last = Some(v.clone()),
                            None => *cell = last.clone(),
                        }
                    }
                }
            }
            FillAxis::Column => {
                for col in 0..self.year_labels.len() {
                    let mut last: Option<String> = None;
                    for row in &mut self.rows {
                        let Some(cell) = row.cells.get_mut(col) else {
                            continue;
                        };
                        match cell {
                            Some(v) => last = Some(v.clone()),
                            None => *cell = last.clone(),
                        }
                    }
                }
            }
        }
    }

    /// Count of absent cells, for load diagnostics.
    pub fn missing_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.iter().filter(|c| c.is_none()).count())
            .sum()
    }
}

/// Load a wide indicator CSV and forward-fill it along `fill_axis`.
pub fn load_wide_table(path: &Path, fill_axis: FillAxis) -> Result<WideTable, LoaderError> {
    let csv_error = |source: PolarsError| LoaderError::CsvError {
        path: path.to_path_buf(),
        source,
    };

    // Every column is read as a string; coercion happens in the tidy step
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .map_err(csv_error)?
        .collect()
        .map_err(csv_error)?;

    let mut table = wide_table_from_frame(&df).map_err(csv_error)?.ok_or_else(|| {
        LoaderError::MissingCountryColumn {
            path: path.to_path_buf(),
        }
    })?;

    let before = table.missing_cells();
    table.forward_fill(fill_axis);
    debug!(
        path = %path.display(),
        filled = before - table.missing_cells(),
        "forward-filled raw cells"
    );

    info!(
        path = %path.display(),
        rows = table.rows.len(),
        years = table.year_labels.len(),
        "loaded wide table"
    );
    Ok(table)
}

/// Convert an all-string DataFrame into a `WideTable`. `None` when there is no column at all.
fn wide_table_from_frame(df: &DataFrame) -> PolarsResult<Option<WideTable>> {
    let columns = df.get_columns();
    let Some((index_col, year_cols)) = columns.split_first() else {
        return Ok(None);
    };

    let countries = index_col.str()?;
    let year_cells = year_cols
        .iter()
        .map(|c| c.str())
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(country) = countries.get(i).map(str::trim).filter(|c| !c.is_empty()) else {
            warn!(row = i, "skipping row without a country");
            continue;
        };

        let cells = year_cells
            .iter()
            .map(|ca| {
                ca.get(i)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect();

        rows.push(WideRow {
            country: country.to_string(),
            cells,
        });
    }

    Ok(Some(WideTable {
        index_name: index_col.name().to_string(),
        year_labels: year_cols.iter().map(|c| c.name().to_string()).collect(),
        rows,
    }))
}
