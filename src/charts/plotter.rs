//! Chart Plotter Module
//! Draws the interactive bubble chart using egui_plot.

use super::spec::{bubble_area, bubble_radius, ChartSpec, ColorScale};
use crate::data::{Dataset, MergedRow, ViewTable};
use crate::stats::{IndicatorStats, ViewSummary};
use egui::{Color32, RichText};
use egui_plot::{Legend, Plot, Points};
use std::collections::HashMap;

/// Shorten large numbers: `1500` -> `1.5k`, `2300000` -> `2.3M`.
pub fn compact_number(v: f64) -> String {
    let abs = v.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (v / 1e9, "B")
    } else if abs >= 1e6 {
        (v / 1e6, "M")
    } else if abs >= 1e3 {
        (v / 1e3, "k")
    } else {
        (v, "")
    };

    let text = format!("{:.1}", scaled);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}

fn optional(v: Option<f64>) -> String {
    v.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

/// Hover text listing every tooltip field of a row.
pub fn tooltip_text(row: &MergedRow) -> String {
    format!(
        "{}\nyear: {}\ngni_per_capita: {}\nlife_expectancy: {}\npopulation: {}",
        row.country,
        row.year,
        optional(row.gni_per_capita),
        optional(row.life_expectancy),
        row.population
            .map(|p| compact_number(p as f64))
            .unwrap_or_else(|| "-".to_string()),
    )
}

fn to_color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Creates the dashboard visualisations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the bubble chart for a view. The x axis plots log10(GNI per capita).
    pub fn draw_bubble_chart(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        dataset: &Dataset,
        colors: &ColorScale,
        view: &ViewTable,
    ) {
        let [x_lo, x_hi] = spec.x_domain();

        let tooltips: HashMap<String, String> = view
            .rows
            .iter()
            .map(|r| (r.country.clone(), tooltip_text(r)))
            .collect();

        Plot::new("bubble_chart")
            .height(spec.height as f32)
            .legend(Legend::default())
            .x_axis_label("GNI per capita (log scale)")
            .y_axis_label("Life expectancy")
            .include_x(x_lo.log10())
            .include_x(x_hi.log10())
            .x_axis_formatter(|mark, _range| compact_number(10f64.powf(mark.value)))
            .label_formatter(move |name, value| match tooltips.get(name) {
                Some(text) => text.clone(),
                None => format!(
                    "gni_per_capita: {}\nlife_expectancy: {:.1}",
                    compact_number(10f64.powf(value.x)),
                    value.y
                ),
            })
            .show(ui, |plot_ui| {
                for row in &view.rows {
                    let (Some(gni), Some(life)) = (row.gni_per_capita, row.life_expectancy) else {
                        continue;
                    };
                    if gni <= 0.0 {
                        continue;
                    }

                    let area = bubble_area(row.population, dataset.max_population);
                    let color = to_color32(colors.color_for(&row.country));

                    plot_ui.points(
                        Points::new(vec![[gni.log10(), life]])
                            .radius(bubble_radius(area) as f32)
                            .color(color.gamma_multiply(0.7))
                            .name(&row.country),
                    );
                }
            });
    }

    /// Draw summary statistics table for the view
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &ViewSummary) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("Countries: {}", summary.rows)).size(12.0));
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(format!(
                            "Total population: {}",
                            compact_number(summary.total_population as f64)
                        ))
                        .size(12.0),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(format!(
                            "Weighted life expectancy: {}",
                            optional(summary.weighted_life_expectancy)
                        ))
                        .size(12.0),
                    );
                });

                ui.add_space(6.0);

                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Indicator", "N", "Mean", "Median", "Std", "Min", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        Self::stats_row(ui, "Life expectancy", summary.life_expectancy.as_ref());
                        Self::stats_row(ui, "GNI per capita", summary.gni_per_capita.as_ref());
                    });
            });
    }

    fn stats_row(ui: &mut egui::Ui, name: &str, stats: Option<&IndicatorStats>) {
        ui.label(RichText::new(name).size(11.0));
        match stats {
            Some(s) => {
                ui.label(RichText::new(s.count.to_string()).size(11.0));
                for v in [s.mean, s.median] {
                    ui.label(RichText::new(format!("{:.2}", v)).size(11.0));
                }
                ui.label(RichText::new(optional(s.std)).size(11.0));
                for v in [s.min, s.max] {
                    ui.label(RichText::new(format!("{:.2}", v)).size(11.0));
                }
            }
            None => {
                for _ in 0..6 {
                    ui.label(RichText::new("-").size(11.0));
                }
            }
        }
        ui.end_row();
    }
}
