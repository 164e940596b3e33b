//! Chart Plotter Module
//! Builds the two chart projections from a filtered view and renders them
//! with egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Plot};
use polars::prelude::*;
use std::collections::BTreeMap;

use crate::data::{DISTANCE_COL, MARKET_COL};

/// Fixed bin count for the distance histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Histogram fill (the original dashboard's indigo).
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Pastel palette for the per-market bars.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(102, 197, 204), // Teal
    Color32::from_rgb(246, 207, 113), // Yellow
    Color32::from_rgb(248, 156, 116), // Orange
    Color32::from_rgb(220, 176, 242), // Lilac
    Color32::from_rgb(135, 197, 95),  // Green
    Color32::from_rgb(158, 185, 243), // Blue
    Color32::from_rgb(254, 136, 177), // Pink
    Color32::from_rgb(201, 219, 116), // Lime
    Color32::from_rgb(139, 224, 164), // Mint
    Color32::from_rgb(180, 151, 231), // Purple
];

/// One bar of the market distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketCount {
    pub market: String,
    pub count: usize,
}

/// One bin of the distance histogram. `upper` is exclusive except for the
/// last bin, which absorbs the maximum value.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Both chart projections of a view, built once per filter change.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub market_counts: Vec<MarketCount>,
    pub histogram: Vec<HistogramBin>,
}

impl ChartData {
    pub fn build(view: &DataFrame) -> Self {
        Self {
            market_counts: market_counts(view),
            histogram: distance_histogram(view, HISTOGRAM_BINS),
        }
    }
}

/// Row counts grouped by market, ordered by descending count then label
/// (the pandas `value_counts` order the original chart used).
pub fn market_counts(view: &DataFrame) -> Vec<MarketCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    if let Ok(col) = view.column(MARKET_COL) {
        let series = col.as_materialized_series();
        for val in series.iter() {
            if val.is_null() {
                continue;
            }
            let label = val.to_string().trim_matches('"').to_string();
            *counts.entry(label).or_insert(0) += 1;
        }
    }

    let mut out: Vec<MarketCount> = counts
        .into_iter()
        .map(|(market, count)| MarketCount { market, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.market.cmp(&b.market)));
    out
}

/// Equal-width binned frequency distribution of the view's distances.
/// Nulls are skipped; an empty view yields no bins; a degenerate zero-width
/// range collapses into a single bin holding every value.
pub fn distance_histogram(view: &DataFrame, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = view
        .column(DISTANCE_COL)
        .ok()
        .and_then(|col| col.f64().ok())
        .map(|ca| ca.into_iter().flatten().collect())
        .unwrap_or_default();

    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in &values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Renders the two dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart of issues per market. Bars sit on integer x positions with
    /// the market labels painted by the axis formatter.
    pub fn draw_market_chart(ui: &mut egui::Ui, counts: &[MarketCount], height: f32) {
        let labels: Vec<String> = counts.iter().map(|mc| mc.market.clone()).collect();

        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, mc)| {
                Bar::new(i as f64, mc.count as f64)
                    .width(0.6)
                    .fill(PALETTE[i % PALETTE.len()])
                    .name(&mc.market)
            })
            .collect();

        Plot::new("market_counts")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Market")
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if mark.value.fract().abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Issues per Market"));
            });
    }

    /// Distance histogram: one bar per bin, centered on the bin midpoint.
    pub fn draw_distance_histogram(ui: &mut egui::Ui, bins: &[HistogramBin], height: f32) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|bin| {
                let width = if bin.width() > 0.0 { bin.width() } else { 1.0 };
                Bar::new(bin.midpoint(), bin.count as f64)
                    .width(width)
                    .fill(HISTOGRAM_COLOR)
                    .name(format!("{:.2} – {:.2}", bin.lower, bin.upper))
            })
            .collect();

        Plot::new("distance_histogram")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Distance")
            .y_axis_label("Frequency")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Distance Spread"));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> DataFrame {
        df!(
            DISTANCE_COL => &[1.0, 5.0, 9.0, 2.0],
            MARKET_COL => &["A", "B", "A", "C"],
        )
        .unwrap()
    }

    /// Counts come back ordered by descending count, ties by label.
    #[test]
    fn market_counts_value_counts_order() {
        let counts = market_counts(&view());
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].market, "A");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].market, "B");
        assert_eq!(counts[2].market, "C");
    }

    #[test]
    fn histogram_spans_view_range_and_preserves_total() {
        let bins = distance_histogram(&view(), HISTOGRAM_BINS);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert!((bins[0].lower - 1.0).abs() < 1e-12);
        assert!((bins.last().unwrap().upper - 9.0).abs() < 1e-9);

        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);

        // The maximum lands in the last bin, not past it.
        assert_eq!(bins.last().unwrap().count, 1);
    }

    #[test]
    fn histogram_of_empty_view_is_empty() {
        let empty = df!(
            DISTANCE_COL => &Vec::<f64>::new(),
            MARKET_COL => &Vec::<String>::new(),
        )
        .unwrap();
        assert!(distance_histogram(&empty, HISTOGRAM_BINS).is_empty());
        assert!(market_counts(&empty).is_empty());
    }

    /// All-identical distances collapse into one bin instead of dividing by
    /// a zero width.
    #[test]
    fn histogram_degenerate_range_single_bin() {
        let flat = df!(
            DISTANCE_COL => &[3.0, 3.0, 3.0],
            MARKET_COL => &["A", "A", "B"],
        )
        .unwrap();
        let bins = distance_histogram(&flat, HISTOGRAM_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn histogram_skips_null_distances() {
        let df = df!(
            DISTANCE_COL => &[Some(1.0), None, Some(2.0)],
            MARKET_COL => &["A", "A", "A"],
        )
        .unwrap();
        let bins = distance_histogram(&df, 2);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }
}
