//! Control Panel Widget
//! Left side panel with the year slider, country selection and export controls.

use crate::data::{Dataset, Selection};
use crate::export::ExportFormat;
use egui::{Color32, RichText, ScrollArea};

/// Left side control panel driving the view filter.
pub struct ControlPanel {
    pub year: i32,
    pub year_range: Option<(i32, i32)>,
    pub countries: Vec<String>,
    pub selected: Vec<bool>,
    pub search: String,
    pub status: String,
}

impl ControlPanel {
    /// Start from the earliest year with every country selected.
    pub fn new(dataset: &Dataset) -> Self {
        let initial = dataset.initial_selection();
        Self {
            year: initial.year,
            year_range: dataset.year_range,
            countries: dataset.countries.clone(),
            selected: vec![true; dataset.countries.len()],
            search: String::new(),
            status: format!(
                "Loaded {} rows, {} countries",
                dataset.table.len(),
                dataset.countries.len()
            ),
        }
    }

    /// Current year and selected countries.
    pub fn selection(&self) -> Selection {
        Selection::new(
            self.year,
            self.countries
                .iter()
                .zip(&self.selected)
                .filter(|(_, &on)| on)
                .map(|(c, _)| c.clone()),
        )
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&on| on).count()
    }

    /// Indices of countries whose name contains the search text (case-insensitive).
    pub fn visible_countries(&self) -> Vec<usize> {
        let needle = self.search.trim().to_lowercase();
        self.countries
            .iter()
            .enumerate()
            .filter(|(_, c)| needle.is_empty() || c.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Set every visible country to `on`.
    pub fn set_visible(&mut self, on: bool) {
        for i in self.visible_countries() {
            self.selected[i] = on;
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Indicator Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Life expectancy · Population · GNI")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Year").size(14.0).strong());
        ui.add_space(5.0);

        match self.year_range {
            Some((lo, hi)) => {
                let slider = egui::Slider::new(&mut self.year, lo..=hi).text("Select year");
                if ui.add(slider).changed() {
                    action = ControlPanelAction::SelectionChanged;
                }
            }
            None => {
                ui.label(RichText::new("No years available").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Country Section =====
        ui.label(
            RichText::new(format!(
                "🏳 Countries ({}/{})",
                self.selected_count(),
                self.countries.len()
            ))
            .size(14.0)
            .strong(),
        );
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search);
        });

        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for i in self.visible_countries() {
                        if ui.checkbox(&mut self.selected[i], &self.countries[i]).changed() {
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.set_visible(true);
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.set_visible(false);
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.label(RichText::new("📄 Export View").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            for (format, label) in [
                (ExportFormat::Png, "🖼 Export PNG"),
                (ExportFormat::Csv, "📑 Export CSV"),
                (ExportFormat::VegaLite, "🧾 Export Chart Spec"),
            ] {
                let button = egui::Button::new(RichText::new(label).size(14.0))
                    .min_size(egui::vec2(180.0, 28.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export(format);
                }
                ui.add_space(4.0);
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    Export(ExportFormat),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MergedRow, MergedTable};

    fn dataset() -> Dataset {
        let row = |country: &str, year: i32| MergedRow {
            country: country.to_string(),
            year,
            life_expectancy: Some(70.0),
            population: Some(10),
            gni_per_capita: Some(100.0),
        };
        Dataset::from_table(MergedTable {
            rows: vec![
                row("Norway", 2001),
                row("Nigeria", 2001),
                row("Chile", 2001),
                row("Norway", 1999),
            ],
        })
    }

    #[test]
    fn starts_with_min_year_and_all_countries() {
        let panel = ControlPanel::new(&dataset());
        assert_eq!(panel.year, 1999);
        assert_eq!(panel.year_range, Some((1999, 2001)));
        assert_eq!(panel.selection().countries.len(), 3);
    }

    #[test]
    fn bulk_toggles_apply_to_search_matches_only() {
        let mut panel = ControlPanel::new(&dataset());
        panel.search = "ni".to_string();
        assert_eq!(panel.visible_countries(), vec![1]);

        panel.search = "N".to_string();
        panel.set_visible(false);
        let selection = panel.selection();
        assert_eq!(selection.countries.len(), 1);
        assert!(selection.countries.contains("Chile"));

        panel.search.clear();
        panel.set_visible(false);
        assert!(panel.selection().countries.is_empty());
    }
}
