//! Chart Viewer Widget
//! Central panel showing the bubble chart and summary for the current view.

use crate::charts::{ChartPlotter, ChartSpec, ColorScale};
use crate::data::{Dataset, ViewTable};
use crate::stats::{StatsCalculator, ViewSummary};
use egui::{RichText, ScrollArea};

/// Holds the latest filtered view; replaced wholesale on every selection change.
#[derive(Default)]
pub struct ChartViewer {
    pub view: ViewTable,
    pub summary: ViewSummary,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, view: ViewTable) {
        self.summary = StatsCalculator::summarize(&view);
        self.view = view;
    }

    pub fn show(&self, ui: &mut egui::Ui, spec: &ChartSpec, dataset: &Dataset, colors: &ColorScale) {
        if self.view.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.label(
                RichText::new(format!("Data Visualization Dashboard: {}", self.view.year))
                    .size(18.0)
                    .strong(),
            );
            ui.add_space(8.0);

            ChartPlotter::draw_bubble_chart(ui, spec, dataset, colors, &self.view);

            ui.add_space(10.0);
            ChartPlotter::draw_summary_table(ui, &self.summary);
        });
    }
}
