//! Static Chart Renderer
//! Renders the current view as a PNG bubble chart with plotters.
//!
//! Layout mirrors the interactive chart: log-scaled GNI per capita on x,
//! life expectancy on y, bubble area by population, one color per country.

use super::spec::{bubble_area, bubble_radius, ChartSpec, ColorScale};
use crate::data::{Dataset, ViewTable};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: the current selection is empty")]
    EmptyView,
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Y range covering the view's life expectancy, padded by 10%.
    pub fn y_range(view: &ViewTable) -> (f64, f64) {
        let (min, max) = view
            .rows
            .iter()
            .filter_map(|r| r.life_expectancy)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if min.is_infinite() {
            return (0.0, 100.0);
        }
        let pad = ((max - min) * 0.1).max(1.0);
        ((min - pad).floor(), (max + pad).ceil())
    }

    /// Render `view` to a PNG at `path`, sized like the chart spec.
    pub fn render_png(
        path: &Path,
        spec: &ChartSpec,
        dataset: &Dataset,
        colors: &ColorScale,
        view: &ViewTable,
    ) -> Result<(), RenderError> {
        if view.is_empty() {
            return Err(RenderError::EmptyView);
        }

        let [x_lo, x_hi] = spec.x_domain();
        let (y_lo, y_hi) = Self::y_range(view);

        let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Indicators in {}", view.year), ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("GNI per capita (log scale)")
            .y_desc("Life expectancy")
            .draw()
            .map_err(draw_err)?;

        for row in &view.rows {
            let (Some(gni), Some(life)) = (row.gni_per_capita, row.life_expectancy) else {
                continue;
            };
            if gni <= 0.0 {
                continue;
            }

            let (r, g, b) = colors.color_for(&row.country);
            let radius = bubble_radius(bubble_area(row.population, dataset.max_population));
            let style = RGBColor(r, g, b).mix(0.7).filled();

            chart
                .draw_series(std::iter::once(Circle::new((gni, life), radius, style)))
                .map_err(draw_err)?
                .label(row.country.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, RGBColor(r, g, b).filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}
