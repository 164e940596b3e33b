//! NRDC Missing Anchors Monitor
//!
//! Interactive dashboard over `nrdc_missing_anchors.csv`: filter anchor
//! records by distance and market, inspect summary metrics and charts,
//! export the current view or a single market as CSV.

mod data;
mod stats;
mod charts;
mod export;
mod gui;

use eframe::egui;
use gui::AnchorApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("NRDC Missing Anchors Monitor"),
        ..Default::default()
    };

    eframe::run_native(
        "NRDC Missing Anchors Monitor",
        options,
        Box::new(|cc| Ok(Box::new(AnchorApp::new(cc)))),
    )
}
