//! Dashboard Widget
//! Central panel: metrics row, the two charts, and the filtered data table.

use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;
use std::path::Path;

use crate::charts::{ChartData, ChartPlotter};
use crate::data::{FilterState, DATASET_FILE};
use crate::stats::{SummaryCalculator, ViewSummary};

const CHART_HEIGHT: f32 = 300.0;
const TABLE_ROW_HEIGHT: f32 = 20.0;
const TABLE_COL_WIDTH: f32 = 140.0;

/// Everything the central panel renders, rebuilt whenever the filters
/// change: the filtered view plus its metrics and chart projections.
pub struct DashboardData {
    pub view: DataFrame,
    pub summary: ViewSummary,
    pub charts: ChartData,
}

impl DashboardData {
    /// The whole interaction pipeline as one pure step:
    /// (dataset, filters) → (view, metrics, charts).
    pub fn build(dataset: &DataFrame, filter: &FilterState) -> PolarsResult<Self> {
        let view = filter.apply(dataset)?;
        Ok(Self {
            summary: SummaryCalculator::summarize(&view),
            charts: ChartData::build(&view),
            view,
        })
    }
}

/// Renders the central dashboard panel.
pub struct Dashboard;

impl Dashboard {
    /// Error banner shown instead of the dashboard when the dataset file is
    /// absent.
    pub fn show_missing(ui: &mut egui::Ui, searched: &Path) {
        ui.add_space(30.0);
        egui::Frame::none()
            .fill(Color32::from_rgb(58, 28, 32))
            .rounding(8.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "Dataset '{DATASET_FILE}' not found. \
                         Please ensure the file is in the same directory."
                    ))
                    .size(16.0)
                    .color(Color32::from_rgb(248, 215, 218)),
                );
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Searched: {}", searched.display()))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            });
    }

    pub fn show_loading(ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading dataset...").size(16.0));
            });
        });
    }

    pub fn show(ui: &mut egui::Ui, data: &DashboardData) {
        ScrollArea::vertical()
            .id_salt("dashboard")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("📡 NRDC Missing Anchors Dashboard");
                ui.label(
                    RichText::new(
                        "Use the sidebar to filter data by distance and market. \
                         Data updates automatically.",
                    )
                    .size(12.0)
                    .color(Color32::GRAY),
                );
                ui.add_space(10.0);

                Self::metrics_row(ui, &data.summary);
                ui.add_space(15.0);

                ui.label(RichText::new("📊 Visual Analytics").size(16.0).strong());
                ui.add_space(5.0);
                Self::charts_row(ui, &data.charts);
                ui.add_space(15.0);

                ui.label(RichText::new("📋 Filtered Data Table").size(16.0).strong());
                ui.add_space(5.0);
                Self::data_table(ui, &data.view);
            });
    }

    fn metrics_row(ui: &mut egui::Ui, summary: &ViewSummary) {
        ui.columns(4, |cols| {
            Self::metric_card(&mut cols[0], "Total Records", &summary.total_records.to_string());
            Self::metric_card(
                &mut cols[1],
                "Unique Markets",
                &summary.unique_markets.to_string(),
            );
            Self::metric_card(
                &mut cols[2],
                "Avg Distance",
                &ViewSummary::format_distance(summary.mean_distance),
            );
            Self::metric_card(
                &mut cols[3],
                "Max Distance",
                &ViewSummary::format_distance(summary.max_distance),
            );
        });
    }

    fn metric_card(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(24.0).strong());
                });
            });
    }

    fn charts_row(ui: &mut egui::Ui, charts: &ChartData) {
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Issues per Market").size(13.0).strong());
            ChartPlotter::draw_market_chart(&mut cols[0], &charts.market_counts, CHART_HEIGHT);

            cols[1].label(
                RichText::new("Distance Spread (Source to Target)")
                    .size(13.0)
                    .strong(),
            );
            ChartPlotter::draw_distance_histogram(&mut cols[1], &charts.histogram, CHART_HEIGHT);
        });
    }

    /// Striped, virtualised table of the filtered rows. No index column.
    fn data_table(ui: &mut egui::Ui, view: &DataFrame) {
        let columns = view.get_columns();
        let headers: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
        let n_rows = view.height();

        // Header row
        ui.horizontal(|ui| {
            for header in &headers {
                ui.add_sized(
                    [TABLE_COL_WIDTH, TABLE_ROW_HEIGHT],
                    egui::Label::new(RichText::new(header).strong().size(12.0)),
                );
            }
        });
        ui.separator();

        if n_rows == 0 {
            ui.label(RichText::new("No rows match the current filters.").color(Color32::GRAY));
            return;
        }

        let series: Vec<&Series> = columns.iter().map(|c| c.as_materialized_series()).collect();
        let stripe = ui.visuals().faint_bg_color;

        ScrollArea::vertical()
            .id_salt("data_table")
            .max_height(320.0)
            .auto_shrink([false, true])
            .show_rows(ui, TABLE_ROW_HEIGHT, n_rows, |ui, row_range| {
                for row in row_range {
                    let fill = if row % 2 == 1 {
                        stripe
                    } else {
                        Color32::TRANSPARENT
                    };
                    egui::Frame::none().fill(fill).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for s in &series {
                                let text = s
                                    .get(row)
                                    .map(|v| {
                                        if v.is_null() {
                                            String::new()
                                        } else {
                                            v.to_string().trim_matches('"').to_string()
                                        }
                                    })
                                    .unwrap_or_default();
                                ui.add_sized(
                                    [TABLE_COL_WIDTH, TABLE_ROW_HEIGHT],
                                    egui::Label::new(RichText::new(text).size(11.0)),
                                );
                            }
                        });
                    });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DISTANCE_COL, MARKET_COL};
    use std::collections::BTreeSet;

    fn dataset() -> DataFrame {
        df!(
            DISTANCE_COL => &[1.0, 5.0, 9.0],
            MARKET_COL => &["A", "B", "A"],
        )
        .unwrap()
    }

    fn filter(range: (f64, f64), markets: &[&str]) -> FilterState {
        FilterState {
            distance_range: range,
            selected_markets: markets.iter().map(|m| m.to_string()).collect::<BTreeSet<_>>(),
            export_market: String::new(),
        }
    }

    /// End-to-end interaction pipeline: range [0,6] with both markets gives
    /// 2 rows, metrics 2/2/3.0/5.0, and chart projections over those rows.
    #[test]
    fn build_recomputes_view_metrics_and_charts() {
        let data = DashboardData::build(&dataset(), &filter((0.0, 6.0), &["A", "B"])).unwrap();

        assert_eq!(data.view.height(), 2);
        assert_eq!(data.summary.total_records, 2);
        assert_eq!(data.summary.unique_markets, 2);
        assert!((data.summary.mean_distance - 3.0).abs() < 1e-12);
        assert!((data.summary.max_distance - 5.0).abs() < 1e-12);

        assert_eq!(data.charts.market_counts.len(), 2);
        let binned: usize = data.charts.histogram.iter().map(|b| b.count).sum();
        assert_eq!(binned, 2);
    }

    /// Deselecting every market produces the fully-empty payload without
    /// panicking anywhere downstream.
    #[test]
    fn build_with_empty_selection() {
        let data = DashboardData::build(&dataset(), &filter((0.0, 10.0), &[])).unwrap();

        assert_eq!(data.view.height(), 0);
        assert_eq!(data.summary.total_records, 0);
        assert!(data.summary.mean_distance.is_nan());
        assert!(data.charts.market_counts.is_empty());
        assert!(data.charts.histogram.is_empty());
    }
}
