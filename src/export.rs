//! View Export Module
//! Writes the current view as PNG, CSV or a Vega-Lite JSON document.

use crate::charts::{ChartSpec, ColorScale, RenderError, StaticChartRenderer};
use crate::data::{Dataset, ViewTable};
use polars::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to encode chart spec: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Output formats offered by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Csv,
    VegaLite,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Csv => "csv",
            ExportFormat::VegaLite => "json",
        }
    }

    pub fn filter_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG Image",
            ExportFormat::Csv => "CSV Files",
            ExportFormat::VegaLite => "Vega-Lite JSON",
        }
    }
}

pub struct ViewExporter;

impl ViewExporter {
    /// View rows as a DataFrame, in chart tooltip column order.
    pub fn view_to_dataframe(view: &ViewTable) -> PolarsResult<DataFrame> {
        let rows = &view.rows;
        DataFrame::new(vec![
            Column::new(
                "country".into(),
                rows.iter().map(|r| r.country.clone()).collect::<Vec<_>>(),
            ),
            Column::new("year".into(), rows.iter().map(|r| r.year).collect::<Vec<_>>()),
            Column::new(
                "gni_per_capita".into(),
                rows.iter().map(|r| r.gni_per_capita).collect::<Vec<_>>(),
            ),
            Column::new(
                "life_expectancy".into(),
                rows.iter().map(|r| r.life_expectancy).collect::<Vec<_>>(),
            ),
            Column::new(
                "population".into(),
                rows.iter().map(|r| r.population).collect::<Vec<_>>(),
            ),
        ])
    }

    pub fn export_csv(view: &ViewTable, path: &Path) -> Result<(), ExportError> {
        let mut df = Self::view_to_dataframe(view)?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
        Ok(())
    }

    pub fn export_vega_lite(spec: &ChartSpec, view: &ViewTable, path: &Path) -> Result<(), ExportError> {
        let doc = spec.to_vega_lite(view)?;
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &doc)?;
        Ok(())
    }

    /// Write `view` to `path` in the requested format.
    pub fn export(
        format: ExportFormat,
        path: &Path,
        spec: &ChartSpec,
        dataset: &Dataset,
        colors: &ColorScale,
        view: &ViewTable,
    ) -> Result<(), ExportError> {
        match format {
            ExportFormat::Png => StaticChartRenderer::render_png(path, spec, dataset, colors, view)?,
            ExportFormat::Csv => Self::export_csv(view, path)?,
            ExportFormat::VegaLite => Self::export_vega_lite(spec, view, path)?,
        }
        info!(path = %path.display(), rows = view.rows.len(), ?format, "exported view");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MergedRow, MergedTable};
    use std::fs;
    use tempfile::tempdir;

    fn dataset() -> Dataset {
        Dataset::from_table(MergedTable {
            rows: vec![
                MergedRow {
                    country: "Foo".into(),
                    year: 2000,
                    life_expectancy: Some(70.0),
                    population: Some(1000),
                    gni_per_capita: Some(1000.0),
                },
                MergedRow {
                    country: "Bar".into(),
                    year: 2000,
                    life_expectancy: None,
                    population: Some(5),
                    gni_per_capita: Some(20.0),
                },
            ],
        })
    }

    #[test]
    fn csv_has_tooltip_columns() {
        let dataset = dataset();
        let view = dataset.view(&dataset.initial_selection());
        let dir = tempdir().unwrap();
        let path = dir.path().join("view.csv");

        ViewExporter::export_csv(&view, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "country,year,gni_per_capita,life_expectancy,population");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Foo,2000,"));
        assert!(lines[2].starts_with("Bar,2000,"));
    }

    #[test]
    fn vega_lite_document_round_trips_through_disk() {
        let dataset = dataset();
        let spec = ChartSpec::bubble(&dataset);
        let view = dataset.view(&dataset.initial_selection());
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.json");

        ViewExporter::export(
            ExportFormat::VegaLite,
            &path,
            &spec,
            &dataset,
            &ColorScale::new(&dataset.countries),
            &view,
        )
        .unwrap();

        let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["mark"], "circle");
        assert_eq!(doc["data"]["values"].as_array().unwrap().len(), 2);
        assert!(doc["data"]["values"][1]["life_expectancy"].is_null());
    }

    #[test]
    fn empty_view_png_export_fails() {
        let dataset = dataset();
        let spec = ChartSpec::bubble(&dataset);
        let dir = tempdir().unwrap();

        let err = ViewExporter::export(
            ExportFormat::Png,
            &dir.path().join("chart.png"),
            &spec,
            &dataset,
            &ColorScale::default(),
            &ViewTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Render(RenderError::EmptyView)));
    }
}
