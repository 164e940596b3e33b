//! Filter Panel Widget
//! Left sidebar with the distance range, market selection, export controls,
//! and the load diagnostics from the original sidebar.

use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::path::PathBuf;

use crate::data::FilterState;
use crate::export::FILTERED_VIEW_FILE;

/// Actions the sidebar hands back to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    /// Range or market selection changed; the view must be recomputed.
    FiltersChanged,
    ExportFiltered,
    ExportMarket,
    RetryLoad,
}

/// Left side filter panel.
pub struct FilterPanel {
    pub filter: FilterState,
    /// Sorted distinct markets of the loaded dataset.
    pub markets: Vec<String>,
    /// Distance bounds of the loaded dataset; sliders are clamped to these.
    pub distance_bounds: (f64, f64),
    pub dataset_path: Option<PathBuf>,
    pub status: String,
    /// Directory listing shown when the dataset file is absent.
    pub diagnostics: Vec<String>,
    pub has_data: bool,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            markets: Vec::new(),
            distance_bounds: (0.0, 0.0),
            dataset_path: None,
            status: "Looking for dataset...".to_string(),
            diagnostics: Vec::new(),
            has_data: false,
        }
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly loaded dataset's markets and bounds, resetting the
    /// filters to their defaults (full range, everything selected).
    pub fn configure(&mut self, markets: Vec<String>, bounds: Option<(f64, f64)>, path: PathBuf) {
        self.filter = FilterState::for_dataset(&markets, bounds);
        self.distance_bounds = bounds.unwrap_or((0.0, 0.0));
        self.markets = markets;
        self.dataset_path = Some(path);
        self.diagnostics.clear();
        self.has_data = true;
    }

    /// Draw the panel; returns at most one action per frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📡 NRDC Anchors")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Missing Anchors Monitor")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        self.show_data_source(ui, &mut action);

        if self.has_data {
            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
            ui.label(RichText::new("🎚 Filter Controls").size(14.0).strong());
            ui.add_space(8.0);

            self.show_distance_filter(ui, &mut action);
            ui.add_space(10.0);
            self.show_market_filter(ui, &mut action);

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
            self.show_export_section(ui, &mut action);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);
        self.show_status(ui);

        action
    }

    fn show_data_source(&mut self, ui: &mut egui::Ui, action: &mut FilterPanelAction) {
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if let Some(path) = &self.dataset_path {
                    ui.label(
                        RichText::new(format!("Looking for file at: {}", path.display()))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }

                if self.has_data {
                    ui.label(
                        RichText::new("✅ File Found!")
                            .size(12.0)
                            .color(Color32::from_rgb(40, 167, 69)),
                    );
                } else {
                    ui.label(
                        RichText::new("❌ File Not Found")
                            .size(12.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                    if ui.button("↻ Retry").clicked() {
                        *action = FilterPanelAction::RetryLoad;
                    }
                }
            });

        if !self.diagnostics.is_empty() {
            ui.add_space(5.0);
            ui.label(RichText::new("Files in this folder:").size(11.0));
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics")
                        .max_height(100.0)
                        .show(ui, |ui| {
                            for name in &self.diagnostics {
                                ui.label(RichText::new(name).size(10.0).color(Color32::GRAY));
                            }
                        });
                });
        }
    }

    fn show_distance_filter(&mut self, ui: &mut egui::Ui, action: &mut FilterPanelAction) {
        let (lo, hi) = self.distance_bounds;
        ui.label("Distance Range:");

        let min_resp = ui.add(
            egui::Slider::new(&mut self.filter.distance_range.0, lo..=hi)
                .text("Min")
                .fixed_decimals(2),
        );
        let max_resp = ui.add(
            egui::Slider::new(&mut self.filter.distance_range.1, lo..=hi)
                .text("Max")
                .fixed_decimals(2),
        );

        if min_resp.changed() || max_resp.changed() {
            // Dragging one handle past the other collapses the interval
            // instead of inverting it.
            if min_resp.changed() && self.filter.distance_range.0 > self.filter.distance_range.1 {
                self.filter.distance_range.1 = self.filter.distance_range.0;
            }
            if max_resp.changed() && self.filter.distance_range.1 < self.filter.distance_range.0 {
                self.filter.distance_range.0 = self.filter.distance_range.1;
            }
            self.filter.clamp_range(self.distance_bounds);
            *action = FilterPanelAction::FiltersChanged;
        }
    }

    fn show_market_filter(&mut self, ui: &mut egui::Ui, action: &mut FilterPanelAction) {
        ui.label(format!(
            "Markets ({}/{}):",
            self.filter.selected_markets.len(),
            self.markets.len()
        ));

        ui.horizontal(|ui| {
            if ui.small_button("All").clicked() {
                self.filter.selected_markets = self.markets.iter().cloned().collect();
                *action = FilterPanelAction::FiltersChanged;
            }
            if ui.small_button("None").clicked() {
                self.filter.selected_markets.clear();
                *action = FilterPanelAction::FiltersChanged;
            }
        });

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("market_filter")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for market in &self.markets {
                            let mut checked = self.filter.selected_markets.contains(market);
                            if ui.checkbox(&mut checked, market).changed() {
                                if checked {
                                    self.filter.selected_markets.insert(market.clone());
                                } else {
                                    self.filter.selected_markets.remove(market);
                                }
                                *action = FilterPanelAction::FiltersChanged;
                            }
                        }
                    });
            });
    }

    fn show_export_section(&mut self, ui: &mut egui::Ui, action: &mut FilterPanelAction) {
        ui.label(RichText::new("📥 Download Reports").size(14.0).strong());
        ui.add_space(5.0);

        if ui
            .button("Download Filtered Results (CSV)")
            .on_hover_text("Saves only the data currently visible based on your filters.")
            .clicked()
        {
            *action = FilterPanelAction::ExportFiltered;
        }
        ui.label(
            RichText::new(format!("→ {FILTERED_VIEW_FILE}"))
                .size(10.0)
                .color(Color32::GRAY),
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Market to export:");
            ComboBox::from_id_salt("export_market")
                .width(120.0)
                .selected_text(&self.filter.export_market)
                .show_ui(ui, |ui| {
                    for market in &self.markets {
                        if ui
                            .selectable_label(self.filter.export_market == *market, market)
                            .clicked()
                        {
                            self.filter.export_market = market.clone();
                        }
                    }
                });
        });

        let export_label = format!("Download Market {} Full Report", self.filter.export_market);
        ui.add_enabled_ui(!self.filter.export_market.is_empty(), |ui| {
            if ui.button(export_label).clicked() {
                *action = FilterPanelAction::ExportMarket;
            }
        });
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let status_color = if self.status.contains("Error") || self.status.contains("Not Found") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Saved") || self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
    }

    /// Set the status line at the bottom of the panel.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
