//! Indicator Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartSpec, ColorScale};
use crate::data::Dataset;
use crate::export::{ExportFormat, ViewExporter};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use tracing::{debug, error, warn};

/// Main application window.
pub struct DashboardApp {
    dataset: &'static Dataset,
    spec: ChartSpec,
    colors: ColorScale,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: &'static Dataset) -> Self {
        let mut app = Self {
            dataset,
            spec: ChartSpec::bubble(dataset),
            colors: ColorScale::new(&dataset.countries),
            control_panel: ControlPanel::new(dataset),
            chart_viewer: ChartViewer::new(),
        };
        app.handle_selection_changed();
        app
    }

    /// Re-run the view filter against the cached dataset.
    fn handle_selection_changed(&mut self) {
        let selection = self.control_panel.selection();
        let view = self.dataset.view(&selection);
        debug!(
            year = selection.year,
            countries = selection.countries.len(),
            rows = view.rows.len(),
            "view refreshed"
        );
        self.chart_viewer.set_view(view);
    }

    /// Ask for a target path and write the current view there.
    fn handle_export(&mut self, format: ExportFormat) {
        let default_name = format!("indicators_{}.{}", self.chart_viewer.view.year, format.extension());
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.filter_name(), &[format.extension()])
            .set_file_name(&default_name)
            .save_file()
        else {
            return; // User cancelled
        };

        match ViewExporter::export(
            format,
            &path,
            &self.spec,
            self.dataset,
            &self.colors,
            &self.chart_viewer.view,
        ) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!(path = %path.display(), error = %e, "could not open exported file");
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::SelectionChanged => self.handle_selection_changed(),
                        ControlPanelAction::Export(format) => self.handle_export(format),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, &self.spec, self.dataset, &self.colors);
        });
    }
}
