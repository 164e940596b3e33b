//! Anchor Monitor Main Application
//! Main window wiring the sidebar filters to the dashboard, with the dataset
//! loaded once on a background thread and cached for the process lifetime.

use egui::SidePanel;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use crate::data::{
    read_dataset, resolve_dataset_path, sibling_listing, DataLoader, LoaderError,
};
use crate::export;
use crate::gui::{Dashboard, DashboardData, FilterPanel, FilterPanelAction};

/// Dataset load result from the background thread.
enum LoadResult {
    Loaded { df: DataFrame, path: PathBuf },
    Missing { searched: PathBuf, siblings: Vec<String> },
    Failed(String),
}

/// Main application window.
pub struct AnchorApp {
    loader: DataLoader,
    panel: FilterPanel,
    dashboard_data: Option<DashboardData>,

    /// Path that was searched when the dataset turned out to be absent.
    missing_at: Option<PathBuf>,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl AnchorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            panel: FilterPanel::new(),
            dashboard_data: None,
            missing_at: None,
            load_rx: None,
            is_loading: false,
        };
        app.start_load();
        app
    }

    /// Kick off the one-time dataset read. A no-op once the frame is cached;
    /// only a failed or missing load can be retried.
    fn start_load(&mut self) {
        if self.loader.is_loaded() || self.is_loading {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.missing_at = None;
        self.panel.set_status("Looking for dataset...");

        thread::spawn(move || {
            let path = resolve_dataset_path();
            let result = match read_dataset(&path) {
                Ok(df) => LoadResult::Loaded { df, path },
                Err(LoaderError::FileMissing(searched)) => {
                    log::warn!("Dataset not found at {}", searched.display());
                    LoadResult::Missing {
                        siblings: sibling_listing(&searched),
                        searched,
                    }
                }
                Err(e) => {
                    log::error!("Dataset load failed: {e}");
                    LoadResult::Failed(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Poll the background load and install its result.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                should_keep_receiver = false;
                self.is_loading = false;

                match result {
                    LoadResult::Loaded { df, path } => {
                        let rows = df.height();
                        self.loader.set_dataframe(df);
                        self.panel.configure(
                            self.loader.markets(),
                            self.loader.distance_bounds(),
                            path,
                        );
                        self.panel.set_status(&format!("Loaded {rows} rows"));
                        self.rebuild_dashboard();
                    }
                    LoadResult::Missing { searched, siblings } => {
                        self.panel.dataset_path = Some(searched.clone());
                        self.panel.diagnostics = siblings;
                        self.panel.set_status("❌ File Not Found");
                        self.missing_at = Some(searched);
                    }
                    LoadResult::Failed(error) => {
                        self.panel.set_status(&format!("Error: {error}"));
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute the filtered view, metrics, and chart projections from the
    /// cached dataset and the current filter state.
    fn rebuild_dashboard(&mut self) {
        let Some(dataset) = self.loader.dataframe() else {
            return;
        };

        match DashboardData::build(dataset, &self.panel.filter) {
            Ok(data) => self.dashboard_data = Some(data),
            Err(e) => {
                log::error!("Failed to rebuild view: {e}");
                self.panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    /// Save the current filtered view as CSV via a save dialog.
    fn handle_export_filtered(&mut self) {
        let Some(data) = &self.dashboard_data else {
            self.panel.set_status("No data to export");
            return;
        };

        let bytes = match export::filtered_view_csv(&data.view) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.panel.set_status(&format!("Error: {e}"));
                return;
            }
        };

        self.save_bytes(export::FILTERED_VIEW_FILE.to_string(), bytes);
    }

    /// Save the full rows of the chosen market (unfiltered dataset slice).
    fn handle_export_market(&mut self) {
        let market = self.panel.filter.export_market.clone();
        let Some(dataset) = self.loader.dataframe() else {
            self.panel.set_status("No data to export");
            return;
        };

        let bytes = match export::market_report_csv(dataset, &market) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.panel.set_status(&format!("Error: {e}"));
                return;
            }
        };

        self.save_bytes(export::market_report_name(&market), bytes);
    }

    fn save_bytes(&mut self, suggested_name: String, bytes: Vec<u8>) {
        let picked = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(suggested_name.as_str())
            .save_file();

        let Some(path) = picked else {
            return; // User cancelled
        };

        match export::write_report(&path, &bytes) {
            Ok(()) => self.panel.set_status(&format!("Saved {suggested_name}")),
            Err(e) => self.panel.set_status(&format!("Error: {e}")),
        }
    }
}

impl eframe::App for AnchorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - filter controls
        SidePanel::left("filter_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.panel.show(ui);

                    match action {
                        FilterPanelAction::FiltersChanged => self.rebuild_dashboard(),
                        FilterPanelAction::ExportFiltered => self.handle_export_filtered(),
                        FilterPanelAction::ExportMarket => self.handle_export_market(),
                        FilterPanelAction::RetryLoad => self.start_load(),
                        FilterPanelAction::None => {}
                    }
                });
            });

        // Central panel - dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(searched) = &self.missing_at {
                Dashboard::show_missing(ui, searched);
            } else if let Some(data) = &self.dashboard_data {
                Dashboard::show(ui, data);
            } else {
                Dashboard::show_loading(ui);
            }
        });
    }
}
